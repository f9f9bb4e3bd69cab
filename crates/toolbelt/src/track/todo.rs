use super::open_store;
use crate::output::OutputArgs;
use crate::prelude::{println, *};
use colored::Colorize;
use toolbelt_core::track::todo::{Todo, TodoFilter, TodoList};

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Add a todo
    #[clap(name = "add")]
    Add {
        /// What needs doing
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List todos
    #[clap(name = "list")]
    List(ListOptions),

    /// Mark a todo done, or not done again
    #[clap(name = "toggle")]
    Toggle { id: u64 },

    /// Replace the text of a todo
    #[clap(name = "edit")]
    Edit {
        id: u64,
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Delete a todo
    #[clap(name = "rm")]
    Remove { id: u64 },

    /// Delete every completed todo
    #[clap(name = "clear")]
    Clear,
}

#[derive(Debug, clap::Args)]
pub struct ListOptions {
    /// all, active or completed
    #[arg(short, long, default_value = "all", value_parser = str::parse::<TodoFilter>)]
    pub filter: TodoFilter,

    #[clap(flatten)]
    pub output: OutputArgs,
}

fn render(todos: &[&Todo], remaining: usize) -> String {
    if todos.is_empty() {
        return "No todos".dimmed().to_string();
    }
    let mut table = new_table();
    for todo in todos {
        let mark = if todo.done { "[x]".green() } else { "[ ]".normal() };
        let text = if todo.done {
            todo.text.dimmed().strikethrough()
        } else {
            todo.text.normal()
        };
        table.add_row(prettytable::row![todo.id, mark, text]);
    }
    f!("{table}{remaining} left")
}

pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    let (store, _) = open_store(&global)?;
    let mut todos = TodoList::open(store)?;

    match cmd {
        Commands::Add { text } => {
            let todo = todos.add(&text.join(" "), chrono::Utc::now())?;
            println!("{} #{} {}", "Added".green(), todo.id, todo.text);
        }
        Commands::List(options) => {
            let listed = todos.list(options.filter);
            let remaining = todos.remaining();
            options.output.emit(&listed, |l| render(l, remaining))?;
        }
        Commands::Toggle { id } => {
            let done = todos.toggle(id)?;
            let state = if done { "done".green() } else { "not done".yellow() };
            println!("#{id} marked {state}");
        }
        Commands::Edit { id, text } => {
            todos.edit(id, &text.join(" "))?;
            println!("{} #{id}", "Updated".green());
        }
        Commands::Remove { id } => {
            todos.delete(id)?;
            println!("{} #{id}", "Deleted".green());
        }
        Commands::Clear => {
            let removed = todos.clear_completed()?;
            println!("Cleared {removed} completed todo(s)");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_render_counts_remaining() {
        colored::control::set_override(false);
        let todo = Todo {
            id: 7,
            text: "Water plants".into(),
            done: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };
        let out = render(&[&todo], 1);
        assert!(out.contains("Water plants"));
        assert!(out.contains("[ ]"));
        assert!(out.ends_with("1 left"));
        assert_eq!(render(&[], 0), "No todos");
    }
}
