//! Interactive menu
//!
//! An explicit state machine driven by a loop:
//!
//! ```text
//! Main --1--> Accounts --5--> Main
//! Main --2--> Transactions --5--> Main
//! Main --3--> Exit
//! ```
//!
//! Invalid input re-shows the current menu. End of input moves to Exit from
//! any state. Every entity operation returns to the menu it came from.

use std::io::{BufRead, Write};

use tracing::error;

use super::errors::CliResult;
use super::session::Session;
use crate::schema::{fields, EntityType, FieldMode};
use crate::storage::{Record, StorageResult};
use crate::store::{CollectionBackend, RecordStore};

const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Menu states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    Accounts,
    Transactions,
    Exit,
}

impl MenuState {
    /// Returns the entity menu for `entity`
    pub fn for_entity(entity: EntityType) -> Self {
        match entity {
            EntityType::Account => MenuState::Accounts,
            EntityType::Transaction => MenuState::Transactions,
        }
    }
}

/// Menu driver over a record store and a session
pub struct Menu<'a, B, R, W> {
    store: &'a RecordStore<B>,
    session: &'a mut Session<R, W>,
}

impl<'a, B, R, W> Menu<'a, B, R, W>
where
    B: CollectionBackend,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a RecordStore<B>, session: &'a mut Session<R, W>) -> Self {
        Self { store, session }
    }

    /// Runs from the main menu until Exit, then closes the session.
    pub fn run(&mut self) -> CliResult<()> {
        let mut state = MenuState::Main;
        while state != MenuState::Exit {
            state = self.step(state)?;
        }
        self.session.close()
    }

    /// Shows the menu for `state`, handles one choice, returns the next state.
    pub fn step(&mut self, state: MenuState) -> CliResult<MenuState> {
        match state {
            MenuState::Main => self.main_menu(),
            MenuState::Accounts => self.entity_menu(EntityType::Account),
            MenuState::Transactions => self.entity_menu(EntityType::Transaction),
            MenuState::Exit => Ok(MenuState::Exit),
        }
    }

    fn main_menu(&mut self) -> CliResult<MenuState> {
        self.session.say("\nMain Menu")?;
        self.session.say("1: Account Operations")?;
        self.session.say("2: Transaction Operations")?;
        self.session.say("3: Exit")?;

        let Some(choice) = self.session.ask("Enter your choice: ")? else {
            return Ok(MenuState::Exit);
        };

        match choice.trim() {
            "1" => Ok(MenuState::Accounts),
            "2" => Ok(MenuState::Transactions),
            "3" => Ok(MenuState::Exit),
            _ => {
                self.session.say(INVALID_CHOICE)?;
                Ok(MenuState::Main)
            }
        }
    }

    fn entity_menu(&mut self, entity: EntityType) -> CliResult<MenuState> {
        let title = entity.title();
        self.session.say(format!("\n{} Operations", title))?;
        self.session.say(format!("1: Create {}", title))?;
        self.session.say(format!("2: View {}", title))?;
        self.session.say(format!("3: Update {}", title))?;
        self.session.say(format!("4: Delete {}", title))?;
        self.session.say("5: Back to Main Menu")?;

        let Some(choice) = self.session.ask("Enter your choice: ")? else {
            return Ok(MenuState::Exit);
        };

        let completed = match choice.trim() {
            "1" => self.create(entity)?,
            "2" => self.view(entity)?,
            "3" => self.update(entity)?,
            "4" => self.delete(entity)?,
            "5" => return Ok(MenuState::Main),
            _ => {
                self.session.say(INVALID_CHOICE)?;
                true
            }
        };

        if completed {
            Ok(MenuState::for_entity(entity))
        } else {
            Ok(MenuState::Exit)
        }
    }

    // Each operation returns `false` when input ran out mid-way.

    fn create(&mut self, entity: EntityType) -> CliResult<bool> {
        let mut data = Record::new();
        for field in fields(entity, FieldMode::Create) {
            let Some(value) = self.session.ask(&format!("Enter {}: ", field))? else {
                return Ok(false);
            };
            data.set(*field, value);
        }

        if let Some(()) = self.report(entity, self.store.create(data, entity))? {
            self.session
                .say(format!("{} created successfully.", entity))?;
        }
        Ok(true)
    }

    fn view(&mut self, entity: EntityType) -> CliResult<bool> {
        let Some(id) = self.session.ask("Enter ID: ")? else {
            return Ok(false);
        };

        match self.report(entity, self.store.read(&id, entity))? {
            Some(Some(record)) => {
                let details = serde_json::to_string_pretty(&record)?;
                self.session.say(format!("{} Details: {}", entity, details))?;
            }
            Some(None) => self.session.say(format!("{} not found.", entity))?,
            None => {}
        }
        Ok(true)
    }

    fn update(&mut self, entity: EntityType) -> CliResult<bool> {
        let Some(id) = self.session.ask("Enter ID to update: ")? else {
            return Ok(false);
        };

        let mut data = Record::new();
        for field in fields(entity, FieldMode::Update) {
            let prompt = format!("Enter new {} (leave blank to keep current): ", field);
            let Some(value) = self.session.ask(&prompt)? else {
                return Ok(false);
            };
            if !value.is_empty() {
                data.set(*field, value);
            }
        }

        match self.report(entity, self.store.update(&id, data, entity))? {
            Some(true) => self
                .session
                .say(format!("{} updated successfully.", entity))?,
            Some(false) => self
                .session
                .say(format!("{} not found or update failed.", entity))?,
            None => {}
        }
        Ok(true)
    }

    fn delete(&mut self, entity: EntityType) -> CliResult<bool> {
        let Some(id) = self.session.ask("Enter ID to delete: ")? else {
            return Ok(false);
        };

        match self.report(entity, self.store.delete(&id, entity))? {
            Some(true) => self
                .session
                .say(format!("{} deleted successfully.", entity))?,
            Some(false) => self
                .session
                .say(format!("{} not found or delete failed.", entity))?,
            None => {}
        }
        Ok(true)
    }

    /// Prints a store failure and turns it into `None`; the loop carries on.
    fn report<T>(&mut self, entity: EntityType, result: StorageResult<T>) -> CliResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                error!(entity = %entity, code = e.code().code(), error = %e, "STORE_OPERATION_FAILED");
                self.session
                    .say(format!("{} operation failed: {}", entity, e))?;
                Ok(None)
            }
        }
    }
}
