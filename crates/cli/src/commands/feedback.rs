//! Feedback commands.

use clap::Subcommand;

use ecopuls_client::resources::{FeedbackController, NewFeedback};
use ecopuls_core::FeedbackId;

use super::{Context, confirm};

#[derive(Subcommand)]
pub enum FeedbackAction {
    /// List feedback entries
    List,
    /// Submit the feedback form
    Submit {
        #[arg(short, long, default_value = "")]
        name: String,

        /// Email or phone
        #[arg(short, long, default_value = "")]
        email: String,

        /// Experience rating, 1-5
        #[arg(short, long)]
        rating: Option<u8>,

        /// What can we improve?
        #[arg(short, long, default_value = "")]
        message: String,

        /// Product viewed or purchased
        #[arg(long, default_value = "")]
        product: String,

        /// Shopping experience (e.g. "Smooth", "Confusing")
        #[arg(long, default_value = "")]
        experience: String,

        /// Was your query answered? (yes/no)
        #[arg(long, default_value = "")]
        support: String,

        /// Any unresolved issues
        #[arg(long, default_value = "")]
        unresolved: String,

        /// Subscribe to the newsletter
        #[arg(long)]
        subscribe: bool,
    },
    /// Delete a feedback entry
    Delete {
        /// Feedback id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn dispatch(
    ctx: &Context,
    action: FeedbackAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let controller = FeedbackController::new(ctx.client.clone());

    match action {
        FeedbackAction::List => {
            let entries = controller.list().await?;
            if entries.is_empty() {
                println!("No feedback yet.");
            }
            for entry in entries {
                let rating = entry
                    .rating
                    .map_or_else(|| "-".to_string(), |r| format!("{r}/5"));
                println!(
                    "{}  {}  {}  {}  {}",
                    entry.id, entry.name, entry.email, rating, entry.message
                );
            }
        }
        FeedbackAction::Submit {
            name,
            email,
            rating,
            message,
            product,
            experience,
            support,
            unresolved,
            subscribe,
        } => {
            let feedback = NewFeedback {
                name,
                email,
                rating,
                message,
                product,
                experience,
                support,
                unresolved,
                subscribe,
            };
            controller.submit(&feedback).await?;
            println!("Thanks for your feedback!");
        }
        FeedbackAction::Delete { id, yes } => {
            if !confirm("Delete this feedback?", yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let id = FeedbackId::new(id);
            controller.remove(&id).await?;
            println!("Deleted feedback {id}");
        }
    }
    Ok(())
}
