use crepo_types::article::{ArticleDocument, AuthorFilter, AuthorName, ExtractError, NameSource, article_key};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    CrepoError,
    client::{CrepoClient, http_client::HttpClient},
    command::object::GetObject,
};
#[derive(Debug, Error)]
enum ArticleError {
    #[error(transparent)]
    Request(#[from] CrepoError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}
/// Reads author and section facts out of article XML stored in a bucket.
///
/// Lookups never fail. Whatever goes wrong is logged at `error` and the names collected
/// before the failure are returned, which may be none at all.
#[derive(Debug, Clone)]
pub struct ArticleClient<Client: HttpClient = reqwest::Client> {
    pub(crate) client: CrepoClient<Client>,
}
impl<Client: HttpClient> ArticleClient<Client> {
    /// `GET /objects/{bucket}?key={article}.XML`, as text. Non 2xx responses are errors.
    pub async fn fetch_article_xml(&self, bucket: &str, article: &str) -> Result<String, CrepoError> {
        let key = article_key(article);
        let response = self
            .client
            .execute_command(GetObject {
                bucket,
                key: &key,
                ..Default::default()
            })
            .await?
            .error_for_status()?;
        Ok(response.utf8_text()?.to_owned())
    }
    /// The bucket holding the corpus on the configured stack
    pub fn default_bucket_name(&self) -> &str {
        self.client.default_bucket_name()
    }
    async fn fetch_document(&self, bucket: &str, article: &str) -> Result<ArticleDocument, ArticleError> {
        let xml = self.fetch_article_xml(bucket, article).await?;
        let document = ArticleDocument::parse(&xml).map_err(ExtractError::from)?;
        Ok(document)
    }
    async fn collect_names(&self, bucket: &str, article: &str, filter: AuthorFilter) -> Vec<String> {
        let mut authors: Vec<AuthorName> = Vec::new();
        let result = match self.fetch_document(bucket, article).await {
            Ok(document) => document
                .collect_authors(filter, &mut authors)
                .map_err(ArticleError::from),
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            error!(bucket, article, ?filter, %err, "Failed to read authors from article");
        }
        authors
            .into_iter()
            .map(|author| {
                if author.source == NameSource::Collab {
                    warn!(bucket, article, name = %author.name, "No individual name found, using collab name");
                }
                author.name
            })
            .collect()
    }
    /// Every `author` contributor, as `"{given-names} {surname}"` or its collab name.
    pub async fn authors(&self, bucket: &str, article: &str) -> Vec<String> {
        self.collect_names(bucket, article, AuthorFilter::All).await
    }
    pub async fn corresponding_authors(&self, bucket: &str, article: &str) -> Vec<String> {
        self.collect_names(bucket, article, AuthorFilter::Corresponding)
            .await
    }
    pub async fn cocontributing_authors(&self, bucket: &str, article: &str) -> Vec<String> {
        self.collect_names(bucket, article, AuthorFilter::CoContributing)
            .await
    }
    pub async fn footnoted_authors(&self, bucket: &str, article: &str) -> Vec<String> {
        self.collect_names(bucket, article, AuthorFilter::Footnoted)
            .await
    }
    /// Section titles in reading order. See [ArticleDocument::collect_sections].
    pub async fn article_sections(&self, bucket: &str, article: &str) -> Vec<String> {
        let mut sections = Vec::new();
        let result = match self.fetch_document(bucket, article).await {
            Ok(document) => document
                .collect_sections(&mut sections)
                .map_err(ArticleError::from),
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => debug!(bucket, article, sections = sections.len(), "Read article sections"),
            Err(err) => error!(bucket, article, %err, "Failed to read sections from article"),
        }
        sections
    }
}
#[cfg(test)]
mod tests {
    use crate::{
        client::{
            CrepoClient, CrepoClientBuilder, RepoConfig,
            http_client::mock::{MockClient, MockResponse},
        },
        test::{CapturedLogs, init_test_logger, mock_config},
    };
    use tracing::Level;

    const ARTICLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<article>
  <front>
    <article-meta>
      <contrib-group>
        <contrib contrib-type="author" equal-contrib="yes">
          <name><surname>Doe</surname><given-names>Jane</given-names></name>
          <xref ref-type="corresp" rid="cor1">*</xref>
        </contrib>
        <contrib contrib-type="author">
          <collab>Study Group</collab>
          <xref ref-type="fn" rid="fn1"/>
        </contrib>
        <contrib contrib-type="author">
          <xref ref-type="fn" rid="fn2"/>
        </contrib>
      </contrib-group>
      <abstract><p>Summary</p></abstract>
    </article-meta>
  </front>
  <body>
    <sec><title>Introduction</title></sec>
    <sec><title>Methods</title></sec>
  </body>
  <back>
    <ack><p>Thanks</p></ack>
    <ref-list><title>References</title></ref-list>
  </back>
</article>"#;

    #[tokio::test]
    async fn reads_authors_and_sections() -> anyhow::Result<()> {
        init_test_logger();
        let mock = MockClient::new([MockResponse::new(200, ARTICLE)]);
        let client = CrepoClient::with_http_client(mock_config(), mock.clone())?;
        let articles = client.articles();

        let article = "10.1371/journal.pone.0000001";
        // The third author has no name, so the list stops there.
        assert_eq!(articles.authors("corpus", article).await, ["Jane Doe", "Study Group"]);
        assert_eq!(articles.corresponding_authors("corpus", article).await, ["Jane Doe"]);
        assert_eq!(articles.cocontributing_authors("corpus", article).await, ["Jane Doe"]);
        assert_eq!(articles.footnoted_authors("corpus", article).await, ["Study Group"]);
        assert_eq!(
            articles.article_sections("corpus", article).await,
            ["Abstract", "Introduction", "Methods", "Acknowledgments", "References"]
        );
        let requests = mock.requests();
        assert_eq!(
            requests[0].url.as_str(),
            "http://localhost:8080/objects/corpus?key=10.1371%2Fjournal.pone.0000001.XML"
        );
        Ok(())
    }
    #[tokio::test]
    async fn reads_from_the_given_bucket() -> anyhow::Result<()> {
        let mock = MockClient::new([MockResponse::new(200, ARTICLE)]);
        let client = CrepoClient::with_http_client(mock_config(), mock.clone())?;
        let articles = client.articles();
        assert_eq!(articles.default_bucket_name(), "corpus");
        assert_eq!(
            articles.corresponding_authors("mogilefs-prod-repo", "a").await,
            ["Jane Doe"]
        );
        assert_eq!(
            mock.requests()[0].url.as_str(),
            "http://localhost:8080/objects/mogilefs-prod-repo?key=a.XML"
        );
        Ok(())
    }
    #[tokio::test]
    async fn collab_fallback_is_reported() -> anyhow::Result<()> {
        let logs = CapturedLogs::default();
        let _guard = logs.capture();
        let mock = MockClient::new([MockResponse::new(200, ARTICLE)]);
        let client = CrepoClient::with_http_client(mock_config(), mock)?;

        let authors = client.articles().authors("corpus", "a").await;
        assert_eq!(authors, ["Jane Doe", "Study Group"]);
        assert!(logs.contains(Level::WARN, "No individual name found"));
        assert!(logs.contains(Level::WARN, "Study Group"));
        assert!(!logs.contains(Level::WARN, "Jane Doe"));
        assert!(logs.contains(Level::ERROR, "Failed to read authors"));
        Ok(())
    }
    #[tokio::test]
    async fn failures_give_empty_lists() -> anyhow::Result<()> {
        init_test_logger();
        let malformed = MockClient::new([MockResponse::new(200, "<article><front></article>")]);
        let client = CrepoClient::with_http_client(mock_config(), malformed)?;
        assert!(client.articles().authors("corpus", "a").await.is_empty());
        assert!(client.articles().article_sections("corpus", "a").await.is_empty());

        let missing = MockClient::new([MockResponse::new(404, "Object not found")]);
        let client = CrepoClient::with_http_client(mock_config(), missing)?;
        assert!(client.articles().authors("corpus", "a").await.is_empty());
        Ok(())
    }
    #[tokio::test]
    async fn unreachable_server() -> anyhow::Result<()> {
        init_test_logger();
        let config = RepoConfig {
            host: "127.0.0.1".to_owned(),
            port: Some(9),
            timeout: 5,
            ..Default::default()
        };
        let client = CrepoClientBuilder::default().with_config(config).build()?;
        assert!(client.articles().footnoted_authors("corpus", "a").await.is_empty());
        Ok(())
    }
}
