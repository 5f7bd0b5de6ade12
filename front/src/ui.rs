//! Line-oriented terminal presentation. All state changes go through the
//! controller; this module only renders and prompts.

use std::io::{self, BufRead, Write};

use tally_api::v1::{ApiError, TodoDraft};
use uuid::Uuid;

use crate::controller::{Controller, TodoService};

type Input = io::Lines<io::StdinLock<'static>>;

const HELP: &str = "\
commands:
  list          refresh and print the list
  add           create a new todo
  edit <n>      edit row n
  toggle <n>    flip completion on row n
  del <n>       delete row n
  help          print this help
  quit          exit

enter '.' at a field prompt to cancel; when editing, an empty field keeps
the current value";

pub async fn run<S: TodoService>(controller: &mut Controller<S>) -> eyre::Result<()> {
    let mut input = io::stdin().lock().lines();

    if let Err(err) = controller.refresh().await {
        notify(&err);
    }

    render(controller);
    println!("{HELP}");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = input.next() else { break };
        let line = line?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            None => continue,
            Some("list") => {
                if let Err(err) = controller.refresh().await {
                    notify(&err);
                }
                render(controller);
            }
            Some("add") => add(controller, &mut input).await?,
            Some("edit") => edit(controller, &mut input, parts.next()).await?,
            Some("toggle") => toggle(controller, parts.next()).await,
            Some("del") => delete(controller, parts.next()).await,
            Some("help") => println!("{HELP}"),
            Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown command {other:?}, try help"),
        }
    }

    Ok(())
}

async fn add<S: TodoService>(controller: &mut Controller<S>, input: &mut Input) -> eyre::Result<()> {
    loop {
        let Some(draft) = read_draft(input, None)? else {
            println!("cancelled");
            return Ok(());
        };

        match controller.submit(draft).await {
            Ok(()) => {
                render(controller);
                return Ok(());
            }
            Err(err) => notify(&err),
        }
    }
}

async fn edit<S: TodoService>(
    controller: &mut Controller<S>,
    input: &mut Input,
    arg: Option<&str>,
) -> eyre::Result<()> {
    let Some(id) = row_id(controller, arg) else {
        return Ok(());
    };

    let mut draft = match controller.edit(id).await {
        Ok(draft) => draft,
        Err(err) => {
            notify(&err);
            return Ok(());
        }
    };

    loop {
        let Some(next) = read_draft(input, Some(&draft))? else {
            controller.cancel();
            println!("edit cancelled");
            return Ok(());
        };

        draft = next;

        match controller.submit(draft.clone()).await {
            Ok(()) => {
                render(controller);
                return Ok(());
            }
            Err(err) => notify(&err),
        }
    }
}

async fn toggle<S: TodoService>(controller: &mut Controller<S>, arg: Option<&str>) {
    let Some(id) = row_id(controller, arg) else {
        return;
    };

    match controller.toggle(id).await {
        Ok(()) => render(controller),
        Err(err) => notify(&err),
    }
}

async fn delete<S: TodoService>(controller: &mut Controller<S>, arg: Option<&str>) {
    let Some(id) = row_id(controller, arg) else {
        return;
    };

    match controller.delete(id).await {
        Ok(()) => render(controller),
        Err(err) => notify(&err),
    }
}

fn render<S: TodoService>(controller: &Controller<S>) {
    if controller.todos().is_empty() {
        println!("no todos yet");
        return;
    }

    for (index, todo) in controller.todos().iter().enumerate() {
        let mark = if todo.completed { 'x' } else { ' ' };
        println!("{:>3} [{mark}] {} - {}", index + 1, todo.title, todo.description);
    }
}

fn notify(error: &ApiError) {
    match error {
        ApiError::Validation(fields) => {
            println!("error: validation failed");

            for field in fields {
                println!("  {}: {}", field.field, field.message);
            }
        }
        other => println!("error: {other}"),
    }
}

/// Resolves a 1-based row number against the local list.
fn row_id<S: TodoService>(controller: &Controller<S>, arg: Option<&str>) -> Option<Uuid> {
    let Some(arg) = arg else {
        println!("row number required");
        return None;
    };

    let index = match arg.parse::<usize>() {
        Ok(n) if n >= 1 => n - 1,
        _ => {
            println!("invalid row number {arg:?}");
            return None;
        }
    };

    match controller.todos().get(index) {
        Some(todo) => Some(todo.id),
        None => {
            println!("no row {}", index + 1);
            None
        }
    }
}

fn read_draft(input: &mut Input, current: Option<&TodoDraft>) -> eyre::Result<Option<TodoDraft>> {
    let Some(title) = read_field(input, "title", current.map(|draft| draft.title.as_str()))? else {
        return Ok(None);
    };

    let description = current.map(|draft| draft.description.as_str());
    let Some(description) = read_field(input, "description", description)? else {
        return Ok(None);
    };

    Ok(Some(TodoDraft { title, description }))
}

fn read_field(input: &mut Input, label: &str, current: Option<&str>) -> eyre::Result<Option<String>> {
    match current {
        Some(value) => print!("{label} [{value}]: "),
        None => print!("{label}: "),
    }
    io::stdout().flush()?;

    let Some(line) = input.next() else {
        // stdin closed
        return Ok(None);
    };
    let line = line?;
    let value = line.trim();

    if value == "." {
        return Ok(None);
    }

    if value.is_empty() {
        if let Some(current) = current {
            return Ok(Some(current.to_string()));
        }
    }

    Ok(Some(value.to_string()))
}
