use cetis_cli::admin::{self, NewAdmin};
use cetis_cli::seeder::{self, SeedConfig};
use cetis_config::InstitutionConfig;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "cetis-cli")]
#[command(about = "CETIS CLI - Administrative tools for the CETIS portal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator (admon) account
    CreateAdmin {
        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Paternal surname
        #[arg(short = 'l', long)]
        paternal_surname: Option<String>,

        /// Maternal surname
        #[arg(short = 'm', long)]
        maternal_surname: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake specialties, groups, users and activity
    Seed {
        /// Number of specialties to create
        #[arg(short = 's', long, default_value = "3")]
        specialties: usize,

        /// Number of subjects (and groups) per specialty
        #[arg(long, default_value = "4")]
        subjects: usize,

        /// Number of teachers
        #[arg(long, default_value = "6")]
        teachers: usize,

        /// Number of students per specialty
        #[arg(long, default_value = "20")]
        students: usize,

        /// Weeks of attendance to record
        #[arg(long, default_value = "4")]
        weeks: usize,

        /// Reports per student
        #[arg(long, default_value = "1")]
        reports: usize,
    },
    /// Clear all seeded data (keeps administrators)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            paternal_surname,
            maternal_surname,
            email,
            password,
        } => {
            handle_create_admin(
                &pool,
                first_name,
                paternal_surname,
                maternal_surname,
                email,
                password,
            )
            .await
        }
        Commands::Seed {
            specialties,
            subjects,
            teachers,
            students,
            weeks,
            reports,
        } => {
            let config = SeedConfig {
                specialties,
                subjects_per_specialty: subjects,
                teachers,
                students_per_specialty: students,
                weeks_of_attendance: weeks,
                reports_per_student: reports,
            };
            handle_seed(&pool, config).await
        }
        Commands::ClearSeed => handle_clear_seed(&pool).await,
    }
}

fn prompt(value: Option<String>, label: &str) -> String {
    value.unwrap_or_else(|| {
        Input::new()
            .with_prompt(label)
            .interact_text()
            .unwrap_or_else(|e| {
                eprintln!("❌ Failed to read {}: {}", label.to_lowercase(), e);
                std::process::exit(1);
            })
    })
}

async fn handle_create_admin(
    pool: &PgPool,
    first_name: Option<String>,
    paternal_surname: Option<String>,
    maternal_surname: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let first_name = prompt(first_name, "First name");
    let paternal_surname = prompt(paternal_surname, "Paternal surname");
    let maternal_surname = maternal_surname.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Maternal surname (optional)")
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default()
    });
    let email = prompt(email, "Email address");

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            })
    });

    let maternal_surname = Some(maternal_surname.trim()).filter(|s| !s.is_empty());
    let new_admin = NewAdmin {
        first_name: &first_name,
        paternal_surname: &paternal_surname,
        maternal_surname,
        email: &email,
        password: &password,
    };

    match admin::create_admin(pool, new_admin).await {
        Ok(id) => {
            println!("\n✅ Administrator created successfully!");
            println!("   Id: {}", id);
            println!("   Email: {}", email.trim().to_lowercase());
            println!("   Name: {} {}", first_name, paternal_surname);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating administrator: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, config: SeedConfig) {
    let institution = InstitutionConfig::from_env();

    if let Err(e) = seeder::seed_all(pool, config, &institution.code).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_clear_seed(pool: &PgPool) {
    if let Err(e) = seeder::clear_all(pool).await {
        eprintln!("\n❌ Error clearing seeded data: {}", e);
        std::process::exit(1);
    }
}
