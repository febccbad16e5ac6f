use crate::{
    commands::{ClientCommand, CommandExec},
    config::Config,
};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub mod commands;
pub mod config;
pub mod content_repo;
#[derive(Debug, Clone, Parser)]
#[command(name = "crepo", version, about = "Content repository client")]
pub struct CLI {
    /// Overrides `repo_server` from the configuration file
    #[arg(long, global = true)]
    server: Option<String>,
    #[command(subcommand)]
    command: ClientCommand,
}
fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = CLI::parse();
    let (mut config, home_dir) = config::load_config()?;
    if let Some(server) = cli.server {
        config.repo_server = server;
    }
    let app_instance = AppInstance { config, home_dir };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(actual_main(cli.command, app_instance))
}

async fn actual_main(command: ClientCommand, app_instance: AppInstance) -> anyhow::Result<()> {
    tracing::debug!(server = %app_instance.config.repo_server, home = ?app_instance.home_dir, "Running command");
    command.exec(app_instance).await?;
    Ok(())
}
/// Logs go to stderr so command output can be piped.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

pub struct AppInstance {
    pub config: Config,
    pub home_dir: PathBuf,
}
#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::{
        CLI,
        commands::{
            ClientCommand,
            article::{ArticleSubCommand, AuthorKind},
            bucket::BucketSubCommand,
            object::ObjectSubCommand,
        },
    };
    use crepo::command::object::CreationMethod;

    #[test]
    fn parse_bucket_commands() {
        let cli = CLI::try_parse_from(["crepo", "bucket", "create", "plos", "--id", "7"]).unwrap();
        let ClientCommand::Bucket(bucket) = cli.command else {
            panic!("expected a bucket command");
        };
        assert_eq!(
            bucket.command,
            BucketSubCommand::Create {
                name: "plos".to_owned(),
                id: Some("7".to_owned())
            }
        );
        let cli = CLI::try_parse_from(["crepo", "bucket", "list", "--server", "http://repo:8002/"]).unwrap();
        assert_eq!(cli.server.as_deref(), Some("http://repo:8002/"));
    }
    #[test]
    fn parse_object_commands() {
        let cli = CLI::try_parse_from([
            "crepo", "object", "upload", "corpus", "article.xml", "--create", "auto",
        ])
        .unwrap();
        let ClientCommand::Object(object) = cli.command else {
            panic!("expected an object command");
        };
        assert!(matches!(
            object.command,
            ObjectSubCommand::Upload { create: CreationMethod::Auto, key: None, .. }
        ));
        assert!(CLI::try_parse_from(["crepo", "object", "upload", "corpus", "a", "--create", "replace"]).is_err());

        let cli = CLI::try_parse_from(["crepo", "object", "exists", "corpus", "a", "--version", "2"]).unwrap();
        let ClientCommand::Object(object) = cli.command else {
            panic!("expected an object command");
        };
        assert_eq!(
            object.command,
            ObjectSubCommand::Exists {
                bucket: "corpus".to_owned(),
                key: "a".to_owned(),
                version: Some(2)
            }
        );
    }
    #[test]
    fn parse_article_commands() {
        let cli = CLI::try_parse_from([
            "crepo", "article", "authors", "10.1371/journal.pone.0000001", "--kind", "co-contributing",
        ])
        .unwrap();
        let ClientCommand::Article(article) = cli.command else {
            panic!("expected an article command");
        };
        assert!(matches!(
            article.command,
            ArticleSubCommand::Authors { kind: AuthorKind::CoContributing, bucket: None, .. }
        ));

        let cli = CLI::try_parse_from([
            "crepo", "article", "sections", "10.1371/journal.pone.0000001", "--bucket", "mogilefs-prod-repo",
        ])
        .unwrap();
        let ClientCommand::Article(article) = cli.command else {
            panic!("expected an article command");
        };
        assert_eq!(
            article.command,
            ArticleSubCommand::Sections {
                article: "10.1371/journal.pone.0000001".to_owned(),
                bucket: Some("mogilefs-prod-repo".to_owned())
            }
        );
    }
}
