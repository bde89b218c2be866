//! Account and session CLI commands.

use clap::{Args, Subcommand};

use crate::context::AppContext;
use crate::output::{self, OutputFormat};
use donahub_auth::RegisterRequest;
use donahub_core::error::AppError;
use donahub_entity::user::{User, UserRole};
use donahub_store::seed_demo;

/// Arguments for account commands
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account subcommand
    #[command(subcommand)]
    pub command: AccountCommand,
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Create an account
    Register {
        /// Login email
        #[arg(long)]
        email: String,
        /// Contact name
        #[arg(long)]
        name: String,
        /// company, ngo or volunteer
        #[arg(long)]
        role: UserRole,
        /// Company or NGO name
        #[arg(long)]
        organization: Option<String>,
        /// Contact phone
        #[arg(long)]
        phone: Option<String>,
        /// Volunteer vehicle
        #[arg(long)]
        vehicle: Option<String>,
        /// Volunteer coverage zones, comma separated
        #[arg(long, value_delimiter = ',')]
        zones: Vec<String>,
        /// Volunteer skills, comma separated
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
    },
    /// Log in by email
    Login {
        /// Account email
        email: String,
    },
    /// End the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Replace all data with the demo data set
    Seed {
        /// Wipe existing records first
        #[arg(long)]
        reset: bool,
    },
}

/// Execute account commands
pub async fn execute(args: &AccountArgs, ctx: &AppContext) -> Result<(), AppError> {
    let auth = &ctx.services.auth;

    match &args.command {
        AccountCommand::Register {
            email,
            name,
            role,
            organization,
            phone,
            vehicle,
            zones,
            skills,
        } => {
            let user = auth.register(RegisterRequest {
                email: email.clone(),
                name: name.clone(),
                role: *role,
                organization: organization.clone(),
                phone: phone.clone(),
                vehicle_type: vehicle.clone(),
                coverage_zones: zones.clone(),
                skills: skills.clone(),
            })?;
            ctx.save().await?;
            output::print_success(&format!(
                "Registered {} as {} ({})",
                user.email, user.role, user.id
            ));
        }
        AccountCommand::Login { email } => {
            let user = auth.login(email).await?;
            output::print_success(&format!(
                "Logged in as {} ({})",
                user.display_name(),
                user.role
            ));
        }
        AccountCommand::Logout => {
            auth.logout().await?;
            output::print_success("Logged out");
        }
        AccountCommand::Whoami => match auth.current().await? {
            Some(user) => print_user(&user, ctx.format),
            None => output::print_warning("Not logged in"),
        },
        AccountCommand::Seed { reset } => {
            let store = &ctx.services.store;
            if *reset {
                store.clear();
                auth.logout().await?;
            }
            let demo = seed_demo(store)?;
            ctx.save().await?;
            output::print_success("Demo data installed");
            for (label, id) in [
                ("Company", demo.company),
                ("NGO", demo.ngo),
                ("Volunteer", demo.volunteer),
            ] {
                if let Some(user) = store.find::<User>(id) {
                    output::print_kv(label, &user.email);
                }
            }
        }
    }

    Ok(())
}

fn print_user(user: &User, format: OutputFormat) {
    output::print_item(user, format, |u| {
        output::print_kv("ID", &u.id.to_string());
        output::print_kv("Name", &u.name);
        output::print_kv("Email", &u.email);
        output::print_kv("Role", u.role.as_str());
        output::print_kv("Organization", u.organization.as_deref().unwrap_or("-"));
        output::print_kv("Phone", u.phone.as_deref().unwrap_or("-"));
        if let Some(profile) = &u.volunteer {
            output::print_kv("Vehicle", profile.vehicle_type.as_deref().unwrap_or("-"));
            output::print_kv("Zones", &profile.coverage_zones.join(", "));
            output::print_kv("Skills", &profile.skills.join(", "));
        }
        output::print_kv("Member since", &output::timestamp(&u.created_at));
    });
}
