use clap::{Parser, Subcommand};
use reqwest::Client;
use serde_json::{json, Value};
use std::fs;

const USER_FILE: &str = ".plant_monitor_user";

#[derive(Parser)]
#[command(name = "plant-cli")]
#[command(about = "CLI for the plant monitor service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// List plants; defaults to the logged-in user's plants
    Plants {
        #[arg(long)]
        all: bool,
        #[arg(short = 'U', long)]
        user_id: Option<i64>,
    },
    PlantTypes,
    Users,
    AddPlant {
        #[arg(short = 'U', long)]
        user_id: Option<i64>,
        #[arg(short = 't', long = "type")]
        plant_type: i64,
    },
    Range {
        #[arg(short = 'P', long)]
        plant_id: i64,
    },
    Data {
        #[arg(short = 'P', long)]
        plant_id: Option<i64>,
    },
    LogData {
        #[arg(short = 'P', long)]
        plant_id: i64,
        #[arg(long)]
        humidity: f64,
        #[arg(long)]
        light: f64,
        #[arg(long)]
        temperature: f64,
    },
    Alert {
        #[arg(short = 'P', long)]
        plant_id: i64,
        #[arg(short, long)]
        message: String,
    },
    /// Pop the latest alert from the mailbox
    GetAlert,
    /// Dev mode servers only
    CreateData {
        #[arg(short, long, default_value_t = 2)]
        count: u32,
    },
    Logout,
}

fn saved_user_id() -> Option<i64> {
    fs::read_to_string(USER_FILE).ok()?.trim().parse().ok()
}

fn user_or_saved(user_id: Option<i64>) -> Result<i64, Box<dyn std::error::Error>> {
    user_id
        .or_else(saved_user_id)
        .ok_or_else(|| "no --user-id given and not logged in".into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::Login { username, password } => {
            let res = client.post(format!("{}/login", cli.url))
                .json(&json!({ "username": username, "password": password }))
                .send()
                .await?;
            if res.status().is_success() {
                let body: Value = res.json().await?;
                let id = body["id"].as_i64().ok_or("login response without id")?;
                fs::write(USER_FILE, id.to_string())?;
                println!("Logged in as user {id}. Saved to {USER_FILE}");
            } else {
                println!("Login failed: {}", res.text().await?);
            }
        }
        Commands::Plants { all, user_id } => {
            let url = if all {
                format!("{}/plants", cli.url)
            } else {
                format!("{}/plants/{}", cli.url, user_or_saved(user_id)?)
            };
            let res = client.get(url).send().await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::PlantTypes => {
            let res = client.get(format!("{}/plant_types", cli.url)).send().await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::Users => {
            let res = client.get(format!("{}/users", cli.url)).send().await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::AddPlant { user_id, plant_type } => {
            let res = client.post(format!("{}/addplant", cli.url))
                .json(&json!({ "user_id": user_or_saved(user_id)?, "plantType": plant_type }))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::Range { plant_id } => {
            let res = client.get(format!("{}/getrange/{}", cli.url, plant_id)).send().await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::Data { plant_id } => {
            let url = match plant_id {
                Some(id) => format!("{}/data/{}", cli.url, id),
                None => format!("{}/data", cli.url),
            };
            let res = client.get(url).send().await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::LogData { plant_id, humidity, light, temperature } => {
            let res = client.post(format!("{}/logdata", cli.url))
                .json(&json!({
                    "plant_id": plant_id,
                    "soil_humidity": humidity,
                    "light_level": light,
                    "temperature": temperature
                }))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::Alert { plant_id, message } => {
            let res = client.post(format!("{}/alert", cli.url))
                .json(&json!({ "message": message, "plant_id": plant_id }))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::GetAlert => {
            let res = client.get(format!("{}/getalert", cli.url)).send().await?;
            let body: Value = res.json().await?;
            if body == json!("") {
                println!("No pending alerts");
            } else {
                println!("Alert for plant {}: {}", body["plant_id"], body["message"]);
            }
        }
        Commands::CreateData { count } => {
            let res = client.get(format!("{}/create_data/{}", cli.url, count)).send().await?;
            let status = res.status();
            println!("Response ({}): {}", status, res.text().await?);
        }
        Commands::Logout => {
            let _ = fs::remove_file(USER_FILE);
            println!("Logged out (saved user removed).");
        }
    }

    Ok(())
}
