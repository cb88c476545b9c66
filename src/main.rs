use anyhow::{anyhow, bail, Context, Result};

use bulletin::config::ClientConfig;
use bulletin::domain::ImageFile;
use bulletin::repository::Repository;
use bulletin::services::{
    AnnouncementBoard, AnnouncementDetail, DetailOutcome, ImagePolicy, MemberRoster, Notifier,
    TodoController,
};

const USAGE: &str = "usage: bulletin <command>

commands:
  todos                                   list todos
  add <text>                              create a todo
  edit <id> <text>                        rename a todo
  delete <id>                             delete a todo
  announcements [tag]                     list announcements, optionally by tag
  tags                                    list known tags
  show <id>                               show one announcement
  post <title> <content> <tags> [images]  create an announcement
  members                                 list members";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = ClientConfig::from_env();
    let repository = Repository::connect(&config).context("Failed to set up backend client")?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(command, rest, repository, &config))
}

async fn run(command: &str, args: &[String], repository: Repository, config: &ClientConfig) -> Result<()> {
    match command {
        "todos" => {
            let mut todos = TodoController::new(repository.todos);
            let _ = todos.refresh().await;
            print_todos(&todos);
            print_notices(todos.notifier_mut());
        }
        "add" => {
            let text = args.join(" ");
            let mut todos = TodoController::new(repository.todos);
            todos.set_input(text);
            let _ = todos.submit_add().await;
            print_todos(&todos);
            print_notices(todos.notifier_mut());
        }
        "edit" => {
            let (id, text) = args
                .split_first()
                .ok_or_else(|| anyhow!("edit needs an id and the new text"))?;
            let mut todos = TodoController::new(repository.todos);
            let _ = todos.refresh().await;
            if todos.begin_edit_by_id(id).is_ok() {
                todos.set_draft(text.join(" "));
                let _ = todos.submit_edit().await;
            } else {
                eprintln!("No todo with id {}", id);
            }
            print_todos(&todos);
            print_notices(todos.notifier_mut());
        }
        "delete" => {
            let id = args.first().ok_or_else(|| anyhow!("delete needs an id"))?;
            let mut todos = TodoController::new(repository.todos);
            let _ = todos.delete(id).await;
            print_todos(&todos);
            print_notices(todos.notifier_mut());
        }
        "announcements" => {
            let mut board = AnnouncementBoard::new(repository.announcements, ImagePolicy::from_config(config));
            let _ = match args.first() {
                Some(tag) => board.select_tag(tag).await,
                None => board.load().await,
            };
            print_announcements(&board);
            print_notices(board.notifier_mut());
        }
        "tags" => {
            let mut board = AnnouncementBoard::new(repository.announcements, ImagePolicy::from_config(config));
            let _ = board.load().await;
            for tag in board.tags() {
                println!("{}", tag);
            }
            print_notices(board.notifier_mut());
        }
        "show" => {
            let id = args.first().map(String::as_str).unwrap_or("");
            let mut detail = AnnouncementDetail::new(repository.announcements);
            let outcome = detail.load(id).await;
            if let Some(path) = outcome.redirect() {
                println!("back to {}", path);
            }
            if outcome == DetailOutcome::Show {
                if let Some(announcement) = detail.announcement() {
                    println!("{}", announcement.title);
                    println!("{}", announcement.created_at.format("%Y-%m-%d %H:%M"));
                    if !announcement.tags.is_empty() {
                        println!("tags: {}", announcement.tags.join(", "));
                    }
                    println!();
                    println!("{}", announcement.content);
                    for url in announcement.image_urls() {
                        println!("  {}", url);
                    }
                }
            }
            print_notices(detail.notifier_mut());
        }
        "post" => {
            if args.len() < 3 {
                bail!("post needs a title, content and tags");
            }
            let mut files = Vec::new();
            for path in &args[3..] {
                let file = ImageFile::from_path(path)
                    .with_context(|| format!("Failed to read image {}", path))?;
                files.push(file);
            }

            let mut board = AnnouncementBoard::new(repository.announcements, ImagePolicy::from_config(config));
            let composer = board.composer_mut();
            composer.open();
            composer.set_title(args[0].clone());
            composer.set_content(args[1].clone());
            composer.set_tags(&args[2]);
            board.add_images(files);

            if let Ok(created) = board.create_announcement().await {
                println!("created {}", created.id);
            }
            print_notices(board.notifier_mut());
        }
        "members" => {
            let mut roster = MemberRoster::new(repository.members);
            let _ = roster.ensure_loaded().await;
            for member in roster.members() {
                let avatar = member.avatar_fallback().unwrap_or('?');
                println!("[{}] {} {}", avatar, member.fullname, member.caption());
            }
            print_notices(roster.notifier_mut());
        }
        other => {
            eprintln!("unknown command: {}", other);
            println!("{}", USAGE);
        }
    }
    Ok(())
}

fn print_todos(todos: &TodoController) {
    if todos.items().is_empty() && todos.store().has_loaded() {
        println!("No todos yet");
    }
    for todo in todos.items() {
        println!(
            "{}  {}  {}",
            todo.id,
            todo.created_at.format("%Y-%m-%d %H:%M"),
            todo.todo_text
        );
    }
}

fn print_announcements(board: &AnnouncementBoard) {
    if board.announcements().is_empty() {
        println!("{}", board.empty_message());
    }
    for announcement in board.announcements() {
        let tags = if announcement.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", announcement.tags.join(", "))
        };
        println!("{}  {}{}", announcement.id, announcement.title, tags);
    }
}

fn print_notices(notifier: &mut Notifier) {
    for notice in notifier.drain() {
        if notice.is_error() {
            eprintln!("error: {}", notice.message);
        } else {
            println!("{}", notice.message);
        }
    }
}
