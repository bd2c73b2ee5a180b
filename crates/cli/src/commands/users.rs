//! User administration commands.

use clap::Subcommand;

use ecopuls_client::resources::UserController;
use ecopuls_core::UserId;

use super::{Context, confirm};

#[derive(Subcommand)]
pub enum UserAction {
    /// List registered users (admin)
    List,
    /// Toggle a user's admin flag (admin)
    ToggleAdmin {
        /// User id
        id: String,
    },
    /// Delete a user (admin)
    Delete {
        /// User id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn dispatch(ctx: &Context, action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let controller = UserController::new(ctx.client.clone());

    match action {
        UserAction::List => {
            let users = controller.list().await?;
            if users.is_empty() {
                println!("No users yet.");
            }
            for user in users {
                println!(
                    "{}  {}  {}{}",
                    user.id,
                    user.name,
                    user.email,
                    if user.is_admin { "  (admin)" } else { "" }
                );
            }
        }
        UserAction::ToggleAdmin { id } => {
            // The toggle submits the negation of the current flag, so fetch
            // the collection first to know what we are negating.
            let users = controller.list().await?;
            let id = UserId::new(id);
            let Some(user) = users.into_iter().find(|u| u.id == id) else {
                return Err(format!("no user with id {id}").into());
            };
            let updated = controller.toggle_admin(&user).await?;
            println!(
                "{} is {} an admin",
                updated.email,
                if updated.is_admin { "now" } else { "no longer" }
            );
        }
        UserAction::Delete { id, yes } => {
            if !confirm("Delete this user?", yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let id = UserId::new(id);
            controller.remove(&id).await?;
            println!("Deleted user {id}");
        }
    }
    Ok(())
}
