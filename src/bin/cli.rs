use clap::{Parser, Subcommand};
use salon_booking::{
    config::server::ServerConfig,
    db,
    services::user_service::{CreateUserRequest, UpdatePasswordRequest},
    AppState,
};

#[derive(Parser)]
#[command(name = "salon-cli")]
#[command(about = "CLI tool for managing salon administrators and bookings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrator management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Appointment commands
    Appointments {
        #[command(subcommand)]
        command: AppointmentCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new administrator
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List all administrators
    List,

    /// Set a new password for an administrator
    SetPassword {
        /// Login name of the administrator
        #[arg(short, long)]
        username: String,

        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum AppointmentCommands {
    /// Print every booking in insertion order
    List,
}

fn get_password(prompt: &str) -> anyhow::Result<String> {
    Ok(rpassword::prompt_password(format!("{}: ", prompt))?)
}

fn confirm_password(prompt: &str) -> anyhow::Result<(String, String)> {
    let password = get_password(prompt)?;
    let confirm = get_password("Confirm password")?;
    Ok((password, confirm))
}

fn fail(message: String) -> ! {
    eprintln!("❌ {}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let state = AppState::new(pool);
    let user_service = state.user_service.clone();

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create { username, password } => {
                let (password, password_confirm) = match password {
                    Some(pw) => (pw.clone(), pw),
                    None => confirm_password("Password")?,
                };

                let request = CreateUserRequest {
                    username,
                    password,
                    password_confirm: Some(password_confirm),
                };

                match user_service.create_user(request).await {
                    Ok(user) => {
                        println!("✅ Administrator created successfully!");
                        println!("  ID: {}", user.id);
                        println!("  Username: {}", user.username);
                    }
                    Err(err) => fail(format!("Failed to create administrator: {}", err)),
                }
            }

            UserCommands::List => match user_service.list_users().await {
                Ok(users) if users.is_empty() => println!("No administrators found."),
                Ok(users) => {
                    println!("{:<5} {:<30} {:<20}", "ID", "Username", "Created");
                    println!("{}", "-".repeat(57));
                    for user in users {
                        println!(
                            "{:<5} {:<30} {:<20}",
                            user.id,
                            user.username,
                            user.created_at.as_deref().unwrap_or("N/A")
                        );
                    }
                }
                Err(err) => fail(format!("Failed to list administrators: {}", err)),
            },

            UserCommands::SetPassword { username, password } => {
                let user = match user_service.find_user_by_username(&username).await {
                    Ok(Some(user)) => user,
                    Ok(None) => fail(format!("Administrator '{}' not found", username)),
                    Err(err) => fail(format!("Failed to find administrator: {}", err)),
                };

                let (new_password, password_confirm) = match password {
                    Some(pw) => (pw.clone(), pw),
                    None => confirm_password("New password")?,
                };

                let request = UpdatePasswordRequest {
                    user_id: user.id,
                    new_password,
                    new_password_confirm: Some(password_confirm),
                };

                match user_service.update_password(request).await {
                    Ok(()) => println!("✅ Password updated successfully for '{}'!", username),
                    Err(err) => fail(format!("Failed to update password: {}", err)),
                }
            }
        },

        Commands::Appointments { command } => match command {
            AppointmentCommands::List => match state.appointment_service.list_all().await {
                Ok(appointments) if appointments.is_empty() => println!("No appointments yet."),
                Ok(appointments) => {
                    println!(
                        "{:<5} {:<30} {:<18} {:<12} {:<6}",
                        "ID", "Client", "Service", "Date", "Time"
                    );
                    println!("{}", "-".repeat(75));
                    for appointment in appointments {
                        println!(
                            "{:<5} {:<30} {:<18} {:<12} {:<6}",
                            appointment.id,
                            appointment.client_name,
                            appointment.service.as_str(),
                            appointment.appointment_date,
                            appointment.appointment_time
                        );
                    }
                }
                Err(err) => fail(format!("Failed to list appointments: {}", err)),
            },
        },
    }

    Ok(())
}
