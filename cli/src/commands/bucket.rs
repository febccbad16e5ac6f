use clap::{Parser, Subcommand};

use crate::{
    AppInstance,
    commands::{CommandExec, CommandExecError},
};
#[derive(Debug, Clone, Parser)]
pub struct BucketCommand {
    #[command(subcommand)]
    pub command: BucketSubCommand,
}
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum BucketSubCommand {
    /// Prints the repository's bucket list as returned
    List,
    Create {
        name: String,
        /// Ask the repository for a specific bucket id
        #[arg(long)]
        id: Option<String>,
    },
    Delete {
        name: String,
    },
}
impl CommandExec for BucketCommand {
    async fn exec(self, app_instance: AppInstance) -> Result<(), CommandExecError> {
        let repo = app_instance.connect().await?;
        match self.command {
            BucketSubCommand::List => {
                println!("{}", repo.list_buckets().await?);
            }
            BucketSubCommand::Create { name, id } => {
                if !repo.create_bucket(&name, id.as_deref()).await? {
                    return Err(CommandExecError::Rejected(format!(
                        "Bucket {name} was not created"
                    )));
                }
                println!("Created bucket {name}");
            }
            BucketSubCommand::Delete { name } => {
                if !repo.delete_bucket(&name).await? {
                    return Err(CommandExecError::Rejected(format!(
                        "Bucket {name} was not deleted"
                    )));
                }
                println!("Deleted bucket {name}");
            }
        }
        Ok(())
    }
}
