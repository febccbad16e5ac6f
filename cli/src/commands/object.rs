use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crepo::command::object::CreationMethod;
use tracing::info;

use crate::{
    AppInstance,
    commands::{CommandExec, CommandExecError},
    content_repo::{ContentRepoError, ObjectUpload},
};
#[derive(Debug, Clone, Parser)]
pub struct ObjectCommand {
    #[command(subcommand)]
    pub command: ObjectSubCommand,
}
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ObjectSubCommand {
    Upload {
        bucket: String,
        file: PathBuf,
        /// Defaults to the file name
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        content_type: Option<String>,
        #[arg(long)]
        download_name: Option<String>,
        /// new, version or auto
        #[arg(long, default_value = "new")]
        create: CreationMethod,
        /// `yyyy-mm-dd hh:mm:ss`
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Exits with an error unless the object exists
    Exists {
        bucket: String,
        key: String,
        #[arg(long)]
        version: Option<u32>,
    },
    /// Prints the object's metadata
    Meta {
        bucket: String,
        key: String,
        #[arg(long)]
        version: Option<u32>,
    },
}
impl CommandExec for ObjectCommand {
    async fn exec(self, app_instance: AppInstance) -> Result<(), CommandExecError> {
        let repo = app_instance.connect().await?;
        match self.command {
            ObjectSubCommand::Upload {
                bucket,
                file,
                key,
                content_type,
                download_name,
                create,
                timestamp,
            } => {
                let key = match key {
                    Some(key) => key,
                    None => file
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .ok_or_else(|| {
                            CommandExecError::Rejected(format!(
                                "{} has no file name to use as a key",
                                file.display()
                            ))
                        })?,
                };
                let response = repo
                    .upload_object(ObjectUpload {
                        bucket: &bucket,
                        file: &file,
                        key: &key,
                        content_type: content_type.as_deref(),
                        download_name: download_name.as_deref(),
                        create,
                        timestamp: timestamp.as_deref(),
                    })
                    .await?;
                let status = response.status();
                info!(%status, key, "Upload answered");
                println!("{}", response.text().await.map_err(ContentRepoError::from)?);
                if !status.is_success() {
                    return Err(CommandExecError::Rejected(format!(
                        "Upload of {key} failed with {status}"
                    )));
                }
            }
            ObjectSubCommand::Exists {
                bucket,
                key,
                version,
            } => {
                if !repo.object_exists(&bucket, &key, version).await? {
                    return Err(CommandExecError::Rejected(format!(
                        "{key} does not exist in {bucket}"
                    )));
                }
                println!("{key} exists in {bucket}");
            }
            ObjectSubCommand::Meta {
                bucket,
                key,
                version,
            } => {
                let response = repo.object_metadata(&bucket, &key, version).await?;
                println!("{}", response.text().await.map_err(ContentRepoError::from)?);
            }
        }
        Ok(())
    }
}
