//! Interactive storefront session: renders the active view and feeds typed
//! commands to the controller as intents.

use std::{io::Write as _, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use client_core::{CatalogEvent, Intent, ProductApi, ViewController, ViewState};
use shared::domain::ProductId;
use tokio::{
    io::{stdin, AsyncBufReadExt, BufReader},
    sync::broadcast::{self, error::TryRecvError},
};
use tracing::{debug, warn};

use crate::{form, render};

const HELP: &str = "\
commands:
  toggle | back | add      primary button (label shown in brackets)
  select <id>              show a product
  buy [id]                 sell one unit of the shown product
  edit                     edit the shown product
  delete [id]              delete the shown product
  submit key=value...      submit the create or edit form
  reload                   fetch the catalog again
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Intent(Intent),
    Redraw,
    Help,
    Quit,
}

pub fn parse_command(line: &str, state: &ViewState) -> Result<ShellCommand> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ShellCommand::Redraw);
    };
    let rest: Vec<&str> = words.collect();

    let intent = match command.to_ascii_lowercase().as_str() {
        "toggle" | "back" | "add" => state.button().intent(),
        "select" | "show" => {
            let id = rest.first().ok_or_else(|| anyhow!("usage: select <id>"))?;
            Intent::Select(ProductId::from(*id))
        }
        "buy" => Intent::Buy(target_id(&rest, state)?),
        "edit" => Intent::RequestEdit,
        "delete" => Intent::Delete(target_id(&rest, state)?),
        "submit" => {
            let fields = form::parse_fields(rest.iter().copied())?;
            match state {
                ViewState::Creating => Intent::SubmitNew(form::new_product(fields)?),
                ViewState::Editing(original) => {
                    Intent::SubmitEdit(form::edited_product(original, fields)?)
                }
                ViewState::Listing | ViewState::Viewing(_) => {
                    bail!("no form is open; use `add` or `edit` first")
                }
            }
        }
        "reload" => Intent::Reload,
        "help" | "?" => return Ok(ShellCommand::Help),
        "quit" | "exit" => return Ok(ShellCommand::Quit),
        other => bail!("unknown command {other:?}; type `help`"),
    };
    Ok(ShellCommand::Intent(intent))
}

/// An explicit id argument, else the product currently shown.
fn target_id(rest: &[&str], state: &ViewState) -> Result<ProductId> {
    if let Some(id) = rest.first() {
        return Ok(ProductId::from(*id));
    }
    state
        .selected()
        .and_then(|product| product.id.clone())
        .ok_or_else(|| anyhow!("no product selected"))
}

pub async fn run(api: Arc<dyn ProductApi>) -> Result<()> {
    let mut controller = ViewController::new(api);
    let mut events = controller.subscribe_events();
    controller.load().await;

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        print_events(&mut events);
        print!("{}> ", render::view(&controller));
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("failed to read command")? else {
            break;
        };

        match parse_command(&line, controller.state()) {
            Ok(ShellCommand::Intent(intent)) => {
                debug!(intent = intent.name(), state = controller.state().name(), "dispatching");
                if let Err(err) = controller.dispatch(intent).await {
                    println!("{err}");
                }
            }
            Ok(ShellCommand::Redraw) => {}
            Ok(ShellCommand::Help) => println!("{HELP}"),
            Ok(ShellCommand::Quit) => break,
            Err(err) => println!("{err:#}"),
        }
    }

    print_events(&mut events);
    Ok(())
}

fn print_events(events: &mut broadcast::Receiver<CatalogEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => println!("* {}", render::event_message(&event)),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "catalog events dropped before display");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
