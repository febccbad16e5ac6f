use clap::{Parser, Subcommand, ValueEnum};
use crepo::client::{ArticleClient, ConfigError, CrepoClientBuilder, RepoConfig};
use url::Url;

use crate::{
    AppInstance,
    commands::{CommandExec, CommandExecError},
};
#[derive(Debug, Clone, Parser)]
pub struct ArticleCommand {
    #[command(subcommand)]
    pub command: ArticleSubCommand,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AuthorKind {
    #[default]
    All,
    Corresponding,
    CoContributing,
    Footnoted,
}
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ArticleSubCommand {
    /// Prints one author per line
    Authors {
        /// Article DOI, such as `10.1371/journal.pone.0000001`
        article: String,
        #[arg(long, value_enum, default_value_t)]
        kind: AuthorKind,
        /// Defaults to the repository's default bucket
        #[arg(long)]
        bucket: Option<String>,
    },
    /// Prints one section title per line
    Sections {
        article: String,
        /// Defaults to the repository's default bucket
        #[arg(long)]
        bucket: Option<String>,
    },
}
impl AppInstance {
    fn article_client(&self) -> Result<ArticleClient, CommandExecError> {
        let server = Url::parse(&self.config.repo_server).map_err(ConfigError::from)?;
        let config = RepoConfig::from_base_url(&server)?;
        let client = CrepoClientBuilder::default().with_config(config).build()?;
        Ok(client.articles())
    }
}
impl CommandExec for ArticleCommand {
    async fn exec(self, app_instance: AppInstance) -> Result<(), CommandExecError> {
        let articles = app_instance.article_client()?;
        let lines = match self.command {
            ArticleSubCommand::Authors {
                article,
                kind,
                bucket,
            } => {
                let bucket = bucket.as_deref().unwrap_or(articles.default_bucket_name());
                match kind {
                    AuthorKind::All => articles.authors(bucket, &article).await,
                    AuthorKind::Corresponding => {
                        articles.corresponding_authors(bucket, &article).await
                    }
                    AuthorKind::CoContributing => {
                        articles.cocontributing_authors(bucket, &article).await
                    }
                    AuthorKind::Footnoted => articles.footnoted_authors(bucket, &article).await,
                }
            }
            ArticleSubCommand::Sections { article, bucket } => {
                let bucket = bucket.as_deref().unwrap_or(articles.default_bucket_name());
                articles.article_sections(bucket, &article).await
            }
        };
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }
}
