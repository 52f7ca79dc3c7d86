//! Demonstration driver for the resource service client.
//!
//! Sequences the user CRUD demo and the two aggregation workflows, turning
//! every outcome into console lines. All failures are reported and absorbed
//! here; the only sequencing decision is skipping update/delete once the
//! create step has failed, since they depend on the created id.

use std::path::Path;
use std::time::Duration;

use clap::{Parser, Subcommand};
use userapi_core::{
    open_todos, save_latest_post_comments, ApiClient, ResourceApi, UreqTransport, User,
};

#[derive(Parser)]
#[command(name = "userapi", about = "Demonstration client for a REST resource service")]
struct Args {
    /// Base URL of the resource service
    #[arg(
        long,
        env = "USERAPI_BASE_URL",
        default_value = "https://jsonplaceholder.typicode.com"
    )]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the user CRUD demonstration sequence
    Users,
    /// Save the comments of a user's most recent post to a JSON file
    Comments {
        #[arg(long, default_value_t = 1)]
        user_id: i64,
    },
    /// List a user's open todo items
    Todos {
        #[arg(long, default_value_t = 1)]
        user_id: i64,
    },
}

fn main() {
    let args = Args::parse();
    let transport = UreqTransport::new(Some(Duration::from_secs(args.timeout)));
    let client = ApiClient::with_transport(&args.base_url, transport);

    match args.command {
        Some(Command::Users) => run_users_demo(&client),
        Some(Command::Comments { user_id }) => run_comment_download(&client, user_id),
        Some(Command::Todos { user_id }) => run_open_todos(&client, user_id),
        None => {
            run_users_demo(&client);
            separator();
            run_comment_download(&client, 1);
            separator();
            run_open_todos(&client, 1);
        }
    }
}

fn separator() {
    println!("{}\n", "-".repeat(72));
}

fn print_user(user: &User) {
    println!("  [{}] {} <{}> (@{})", user.id, user.name, user.email, user.username);
}

/// List, create, rename+update, delete. Update and delete are skipped when
/// the create step fails, since they target the created id.
fn run_users_demo(api: &dyn ResourceApi) {
    println!("All users:");
    let users = api.list_users().unwrap_or_else(|err| {
        eprintln!("failed to fetch users: {err}");
        Vec::new()
    });
    for user in &users {
        print_user(user);
    }

    separator();

    let new_user = User {
        id: 0,
        name: "John Smith".to_string(),
        username: "John.Smith".to_string(),
        email: "smith@example.com".to_string(),
    };
    let created = match api.create_user(&new_user) {
        Ok(created) => {
            println!("Created:");
            print_user(&created);
            created
        }
        Err(err) => {
            eprintln!("failed to create user: {err}");
            println!("User creation failed, skipping update and delete.");
            return;
        }
    };

    separator();

    let renamed = User {
        name: "Steve Goldman".to_string(),
        ..created.clone()
    };
    match api.update_user(&renamed) {
        Ok(updated) => {
            println!("Updated:");
            print_user(&updated);
        }
        Err(err) => eprintln!("failed to update user: {err}"),
    }

    separator();

    let deleted = match api.delete_user(created.id) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("failed to delete user: {err}");
            false
        }
    };
    println!("Deleted successfully: {deleted}");
}

fn run_comment_download(api: &dyn ResourceApi, user_id: i64) {
    match save_latest_post_comments(api, user_id, Path::new(".")) {
        Ok(saved) => println!(
            "Saved to file: {} ({} comments)",
            saved.path.display(),
            saved.count
        ),
        Err(err) => eprintln!("{err}"),
    }
}

fn run_open_todos(api: &dyn ResourceApi, user_id: i64) {
    match open_todos(api, user_id) {
        Ok(todos) if todos.is_empty() => {
            println!("No open todos for user with id={user_id}");
        }
        Ok(todos) => {
            println!("Open todos for user with id={user_id}:");
            for todo in &todos {
                println!("  [ ] #{} {}", todo.id, todo.title);
            }
        }
        Err(err) => eprintln!("failed to fetch todos for user {user_id}: {err}"),
    }
}
