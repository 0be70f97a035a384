//! CLI commands

use anyhow::{Result, bail};
use clap::Subcommand;
use maidease_client::{
    AuthState, GuardOutcome, LoginRedirect, MaidEaseClient, require_authenticated, require_role,
};
use maidease_core::{
    BookingCreate, MaidFilter, RegisterRequest, ReviewCreate, UserRole, UserUpdate,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Tells the terminal user to log in again after the session was torn down
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRedirect;

impl LoginRedirect for TerminalRedirect {
    fn redirect_to_login(&self) {
        eprintln!("session expired, please log in again");
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        /// Account email
        email: String,

        /// Account password
        #[arg(long, env = "MAIDEASE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Create an account
    Register {
        #[arg(long)]
        email: String,

        /// Full name
        #[arg(long)]
        name: String,

        /// `customer` or `maid`
        #[arg(long)]
        role: UserRole,

        #[arg(long, env = "MAIDEASE_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Show who is logged in
    Whoami,

    /// Own profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Browse service providers (customers only)
    Maids {
        #[command(subcommand)]
        command: MaidCommands,
    },

    /// Bookings
    Bookings {
        #[command(subcommand)]
        command: BookingCommands,
    },

    /// Reviews
    Reviews {
        #[command(subcommand)]
        command: ReviewCommands,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile
    Show,

    /// Change profile fields; provider fields are ignored for customers
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        bio: Option<String>,

        #[arg(long)]
        skills: Option<String>,

        /// Years of experience
        #[arg(long)]
        experience: Option<u32>,

        /// Hourly rate
        #[arg(long)]
        rate: Option<f64>,

        #[arg(long)]
        availability: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum MaidCommands {
    /// List providers
    List {
        #[arg(long)]
        skill: Option<String>,

        #[arg(long)]
        min_experience: Option<u32>,

        #[arg(long)]
        max_rate: Option<f64>,
    },

    /// Show one provider
    Show { id: Uuid },
}

#[derive(Subcommand)]
pub enum BookingCommands {
    /// List own bookings
    List,

    /// Show one booking
    Show { id: Uuid },

    /// Book a provider
    Create {
        /// Provider id
        #[arg(long)]
        maid: Uuid,

        /// Date, YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Start time, HH:MM
        #[arg(long)]
        time: String,

        /// Service type (defaults to house cleaning)
        #[arg(long)]
        service: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Change a booking's status (confirm, decline, complete, cancel, ...)
    Status {
        id: Uuid,

        status: String,

        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// Review a completed booking (customers only)
    Create {
        #[arg(long)]
        booking: Uuid,

        /// 1 to 5
        #[arg(long)]
        rating: f64,

        #[arg(long)]
        comment: Option<String>,
    },

    /// Reviews of a provider
    Maid { id: Uuid },

    /// Review of a booking
    Booking { id: Uuid },

    /// Whether a booking has been reviewed
    Check { id: Uuid },
}

impl Commands {
    pub async fn execute(self, client: &MaidEaseClient) -> Result<()> {
        match self {
            Commands::Login { email, password } => {
                let user = client.login(&email, &password).await?;
                info!("Logged in as {}", user.email);
                print_json(&user)
            }
            Commands::Logout => {
                client.logout()?;
                eprintln!("logged out");
                Ok(())
            }
            Commands::Register {
                email,
                name,
                role,
                password,
                phone,
            } => {
                let request =
                    RegisterRequest::new(&email, &name, role, &password, phone.as_deref())?;
                let user = client.register(&request).await?;
                print_json(&user)
            }
            Commands::Whoami => {
                let state = client.bootstrap().await;
                match &state {
                    AuthState::Authenticated(user) => print_json(user),
                    AuthState::Anonymous { cached_user } => {
                        if let Some(user) = cached_user {
                            eprintln!("not logged in (last user: {})", user.email);
                        }
                        allow(require_authenticated(&state))
                    }
                }
            }
            Commands::Profile { command } => command.execute(client).await,
            Commands::Maids { command } => command.execute(client).await,
            Commands::Bookings { command } => command.execute(client).await,
            Commands::Reviews { command } => command.execute(client).await,
        }
    }
}

impl ProfileCommands {
    pub async fn execute(self, client: &MaidEaseClient) -> Result<()> {
        match self {
            ProfileCommands::Show => print_json(&client.me().await?),
            ProfileCommands::Update {
                name,
                phone,
                bio,
                skills,
                experience,
                rate,
                availability,
            } => {
                let changes = UserUpdate {
                    full_name: name,
                    phone_number: phone,
                    bio,
                    skills,
                    experience_years: experience,
                    hourly_rate: rate,
                    availability_schedule: availability,
                };
                if changes.is_empty() {
                    bail!("nothing to update");
                }
                // The role decides which fields are sent, so take it from the server
                let role = client.me().await?.role;
                print_json(&client.update_me(&changes, role).await?)
            }
        }
    }
}

impl MaidCommands {
    pub async fn execute(self, client: &MaidEaseClient) -> Result<()> {
        let state = client.bootstrap().await;
        allow(require_role(&state, &[UserRole::Customer]))?;

        match self {
            MaidCommands::List {
                skill,
                min_experience,
                max_rate,
            } => {
                let filter = MaidFilter {
                    skill,
                    min_experience,
                    max_rate,
                };
                print_json(&client.list_maids(&filter).await?)
            }
            MaidCommands::Show { id } => print_json(&client.get_maid(id).await?),
        }
    }
}

impl BookingCommands {
    pub async fn execute(self, client: &MaidEaseClient) -> Result<()> {
        match self {
            BookingCommands::List => print_json(&client.my_bookings().await?),
            BookingCommands::Show { id } => print_json(&client.get_booking(id).await?),
            BookingCommands::Create {
                maid,
                date,
                time,
                service,
                notes,
            } => {
                let booking = BookingCreate::new(
                    maid,
                    &date,
                    &time,
                    service.as_deref(),
                    notes.as_deref(),
                )?;
                print_json(&client.create_booking(&booking).await?)
            }
            BookingCommands::Status { id, status, notes } => {
                let booking = client
                    .update_booking_status(id, &status, notes.as_deref())
                    .await?;
                print_json(&booking)
            }
        }
    }
}

impl ReviewCommands {
    pub async fn execute(self, client: &MaidEaseClient) -> Result<()> {
        match self {
            ReviewCommands::Create {
                booking,
                rating,
                comment,
            } => {
                let state = client.bootstrap().await;
                allow(require_role(&state, &[UserRole::Customer]))?;

                let review = ReviewCreate::new(booking, rating, comment.as_deref())?;
                print_json(&client.create_review(&review).await?)
            }
            ReviewCommands::Maid { id } => print_json(&client.maid_reviews(id).await?),
            ReviewCommands::Booking { id } => print_json(&client.booking_review(id).await?),
            ReviewCommands::Check { id } => {
                let exists = client.review_exists(id).await?;
                print_json(&serde_json::json!({ "exists": exists }))
            }
        }
    }
}

fn allow(outcome: GuardOutcome) -> Result<()> {
    match outcome {
        GuardOutcome::Allow => Ok(()),
        GuardOutcome::RedirectToLogin => bail!("not logged in, run `maidease login <email>`"),
        GuardOutcome::RedirectToDashboard => bail!("this command is not available for your role"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_outcomes_map_to_errors() {
        assert!(allow(GuardOutcome::Allow).is_ok());

        let err = allow(GuardOutcome::RedirectToLogin).unwrap_err();
        assert!(err.to_string().contains("maidease login"));

        let err = allow(GuardOutcome::RedirectToDashboard).unwrap_err();
        assert!(err.to_string().contains("role"));
    }
}
