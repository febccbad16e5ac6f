pub mod article;
pub mod bucket;
pub mod object;

use crate::{
    AppInstance,
    commands::{article::ArticleCommand, bucket::BucketCommand, object::ObjectCommand},
    content_repo::{ContentRepo, ContentRepoError},
};
use clap::Subcommand;
use crepo::client::{BuilderError, ConfigError};
use thiserror::Error;
#[derive(Debug, Clone, Subcommand)]
pub enum ClientCommand {
    /// List, create and delete buckets
    Bucket(BucketCommand),
    /// Upload objects and inspect their metadata
    Object(ObjectCommand),
    /// Read authors and sections from article XML
    Article(ArticleCommand),
}
impl CommandExec for ClientCommand {
    async fn exec(self, app_instance: AppInstance) -> Result<(), CommandExecError> {
        match self {
            ClientCommand::Bucket(command) => command.exec(app_instance).await,
            ClientCommand::Object(command) => command.exec(app_instance).await,
            ClientCommand::Article(command) => command.exec(app_instance).await,
        }
    }
}
#[derive(Debug, Error)]
pub enum CommandExecError {
    #[error("Failed to execute command: {0}")]
    ContentRepo(#[from] ContentRepoError),
    #[error(transparent)]
    Client(#[from] BuilderError),
    #[error("Invalid repository server: {0}")]
    InvalidServer(#[from] ConfigError),
    #[error("{0}")]
    Rejected(String),
}

pub(crate) trait CommandExec {
    async fn exec(self, app_instance: AppInstance) -> Result<(), CommandExecError>;
}
impl AppInstance {
    pub(crate) async fn connect(&self) -> Result<ContentRepo, CommandExecError> {
        let repo = ContentRepo::connect(&self.config.repo_server).await?;
        Ok(repo)
    }
}
