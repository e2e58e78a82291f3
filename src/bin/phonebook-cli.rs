use clap::{Parser, Subcommand};

use phonebook::config::loader::ENV_DATABASE_URL;
use phonebook::model::NewPerson;
use phonebook::model::PersonRecord;
use phonebook::store::{PersonStore, SqliteStore};

#[derive(Parser)]
#[command(name = "phonebook-cli")]
#[command(about = "Offline administration of the phonebook store", long_about = None)]
struct Cli {
    /// SQLite store to administer (sqlite:...)
    #[arg(short, long, env = ENV_DATABASE_URL)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every person in the phonebook
    List,
    /// Add a person
    Add {
        /// Full name (at least 3 characters)
        name: String,
        /// Phone number (at least 8 characters)
        number: String,
    },
}

async fn open_store(url: &str) -> Result<Box<dyn PersonStore>, Box<dyn std::error::Error>> {
    check_store_url(url)?;
    Ok(Box::new(SqliteStore::connect(url).await?))
}

/// Only persistent targets can be administered offline.
fn check_store_url(url: &str) -> Result<(), String> {
    if url.starts_with("memory:") {
        return Err(format!(
            "{url} is process-local; point --database-url at a sqlite: store"
        ));
    }
    Ok(())
}

fn added_message(record: &PersonRecord) -> String {
    format!("Added {} number {} to phonebook", record.name, record.number)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let store = open_store(&cli.database_url).await?;

    match cli.command {
        Commands::List => {
            println!("phonebook:");
            for person in store.find_all().await? {
                println!("{} {}", person.name, person.number);
            }
        }
        Commands::Add { name, number } => {
            let person = NewPerson::new(name, number)?;
            let record = store.insert(person).await?;
            println!("{}", added_message(&record));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonebook::model::PersonId;

    #[test]
    fn test_added_message() {
        let person = NewPerson::new("Arto Vihavainen", "045-1232456").unwrap();
        let record = PersonRecord::create(PersonId::generate(), person);
        assert_eq!(
            added_message(&record),
            "Added Arto Vihavainen number 045-1232456 to phonebook"
        );
    }

    #[test]
    fn test_memory_store_rejected() {
        assert!(check_store_url("memory://").is_err());
        assert!(check_store_url("memory:").is_err());
        assert!(check_store_url("sqlite::memory:").is_ok());
        assert!(check_store_url("sqlite://phonebook.db").is_ok());
    }

    #[tokio::test]
    async fn test_open_memory_store_fails() {
        assert!(open_store("memory://").await.is_err());
    }
}
