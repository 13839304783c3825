use clap::{Parser, Subcommand};
use serde::Serialize;

use bff_proxy::client::{
    BffClient, ClientError, CreatePost, CreateTodo, CreateUser, DEFAULT_BASE_URL,
};

#[derive(Parser)]
#[command(name = "bff-cli")]
#[command(about = "Browse posts, todos and users through the BFF proxy", long_about = None)]
struct Cli {
    /// Proxy mount point URL.
    #[arg(short, long, env = "BFF_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Posts
    #[command(subcommand)]
    Posts(PostsCommand),
    /// Todos
    #[command(subcommand)]
    Todos(TodosCommand),
    /// Users
    #[command(subcommand)]
    Users(UsersCommand),
}

#[derive(Subcommand)]
enum PostsCommand {
    /// List all posts
    List,
    /// Show one post
    Get { id: u64 },
    /// Create a post
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        user_id: u64,
    },
}

#[derive(Subcommand)]
enum TodosCommand {
    /// List all todos
    List,
    /// Show one todo
    Get { id: u64 },
    /// Create a todo
    Add {
        #[arg(long)]
        todo: String,
        #[arg(long)]
        completed: bool,
        #[arg(long)]
        user_id: u64,
    },
    /// Delete a todo
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum UsersCommand {
    /// List all users
    List,
    /// Show one user
    Get { id: u64 },
    /// Create a user
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        age: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = BffClient::new(&cli.url)?;

    let result = match cli.command {
        Commands::Posts(command) => run_posts(&client, command).await,
        Commands::Todos(command) => run_todos(&client, command).await,
        Commands::Users(command) => run_users(&client, command).await,
    };

    match result {
        Err(ClientError::Status { status, body }) => {
            eprintln!("Error: proxy returned status {}", status);
            eprintln!("Response: {}", body);
            std::process::exit(1);
        }
        other => Ok(other?),
    }
}

async fn run_posts(client: &BffClient, command: PostsCommand) -> Result<(), ClientError> {
    match command {
        PostsCommand::List => print_json(&client.fetch_all_posts().await?),
        PostsCommand::Get { id } => print_json(&client.fetch_post(id).await?),
        PostsCommand::Add {
            title,
            body,
            user_id,
        } => print_json(
            &client
                .create_post(&CreatePost {
                    title,
                    body,
                    user_id,
                })
                .await?,
        ),
    }
}

async fn run_todos(client: &BffClient, command: TodosCommand) -> Result<(), ClientError> {
    match command {
        TodosCommand::List => print_json(&client.fetch_all_todos().await?),
        TodosCommand::Get { id } => print_json(&client.fetch_todo(id).await?),
        TodosCommand::Add {
            todo,
            completed,
            user_id,
        } => print_json(
            &client
                .create_todo(&CreateTodo {
                    todo,
                    completed,
                    user_id,
                })
                .await?,
        ),
        TodosCommand::Delete { id } => print_json(&client.delete_todo(id).await?),
    }
}

async fn run_users(client: &BffClient, command: UsersCommand) -> Result<(), ClientError> {
    match command {
        UsersCommand::List => print_json(&client.fetch_all_users().await?),
        UsersCommand::Get { id } => print_json(&client.fetch_user(id).await?),
        UsersCommand::Add {
            first_name,
            last_name,
            username,
            email,
            phone,
            age,
        } => print_json(
            &client
                .create_user(&CreateUser {
                    first_name,
                    last_name,
                    username,
                    email,
                    phone,
                    age,
                })
                .await?,
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ClientError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
