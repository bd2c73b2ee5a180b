//! Custom product request commands.

use clap::Subcommand;

use ecopuls_client::resources::{CustomRequestController, NewCustomRequest};
use ecopuls_core::CustomRequestId;

use super::{Context, confirm};

#[derive(Subcommand)]
pub enum CustomAction {
    /// List custom product requests
    List,
    /// Submit a custom product request
    Submit {
        /// Your name
        #[arg(short, long)]
        name: String,

        /// Email or phone
        #[arg(short, long)]
        contact: String,

        /// Size (e.g. Medium)
        #[arg(short, long, default_value = "")]
        size: String,

        /// Quantity (e.g. "5 pieces")
        #[arg(short, long, default_value = "")]
        quantity: String,

        /// More details about the customization
        #[arg(short, long, default_value = "")]
        details: String,
    },
    /// Delete a custom product request
    Delete {
        /// Request id
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn dispatch(
    ctx: &Context,
    action: CustomAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let controller = CustomRequestController::new(ctx.client.clone());

    match action {
        CustomAction::List => {
            let requests = controller.list().await?;
            if requests.is_empty() {
                println!("No custom requests yet.");
            }
            for request in requests {
                println!(
                    "{}  {}  {}  {}  {}  {}",
                    request.id,
                    request.name,
                    request.contact,
                    request.size,
                    request.quantity,
                    request.details
                );
            }
        }
        CustomAction::Submit {
            name,
            contact,
            size,
            quantity,
            details,
        } => {
            let request = NewCustomRequest {
                name,
                contact,
                size,
                quantity,
                details,
            };
            controller.submit(&request).await?;
            println!("Custom request submitted! We'll contact you soon.");
        }
        CustomAction::Delete { id, yes } => {
            if !confirm("Delete this custom product request?", yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            let id = CustomRequestId::new(id);
            controller.remove(&id).await?;
            println!("Deleted custom request {id}");
        }
    }
    Ok(())
}
