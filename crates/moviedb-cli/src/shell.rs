//! Interactive menu
//!
//! Each menu item gathers its own input, runs one catalog operation and prints
//! the report. Errors are printed and the menu is shown again.

use std::path::PathBuf;

use moviedb_core::commands::{catalog, FieldUpdates, NewMovie, Selector};
use moviedb_core::config::Config;
use moviedb_core::storage::{self, Database};
use moviedb_core::Result;

use crate::output;
use crate::prompt::Prompter;

const MENU: &str = "\
----- Movie Catalog -----
1. Import movies
2. Search movies
3. Add a movie
4. Modify a movie
5. Delete movies
6. Export movies
7. Exit
-------------------------";

const KEEP_HINT: &str = " (press Enter to keep)";

pub struct Shell<'a> {
    db: &'a Database,
    config: &'a Config,
    prompter: &'a mut Prompter,
}

impl<'a> Shell<'a> {
    pub fn new(db: &'a Database, config: &'a Config, prompter: &'a mut Prompter) -> Self {
        Self {
            db,
            config,
            prompter,
        }
    }

    /// Show the menu until the user exits or input ends
    pub async fn run(&mut self) {
        loop {
            println!("{MENU}");
            let Some(choice) = self.prompter.ask("Choose an option (1-7): ") else {
                break;
            };

            let result = match choice.as_str() {
                "1" => self.import().await,
                "2" => self.search().await,
                "3" => self.add().await,
                "4" => self.modify().await,
                "5" => self.delete().await,
                "6" => self.export().await,
                "7" => break,
                _ => {
                    println!("Invalid option, please choose again.");
                    Ok(())
                }
            };

            if let Err(err) = result {
                output::print_error(&err);
            }
        }
        println!("Goodbye.");
    }

    async fn import(&mut self) -> Result<()> {
        let default = &self.config.files.import_path;
        let Some(answer) = self
            .prompter
            .ask(&format!("Import file [{}]: ", default.display()))
        else {
            return Ok(());
        };
        let path = if answer.is_empty() {
            default.clone()
        } else {
            PathBuf::from(answer)
        };

        let report = storage::import_movies(self.db, &path).await?;
        output::print_import(&report);
        Ok(())
    }

    /// Ask whether to act on every movie, otherwise for a title fragment
    fn ask_selector(&mut self, all_question: &str, title_prompt: &str) -> Option<Selector> {
        if self.prompter.confirm(all_question) {
            Some(Selector::All)
        } else {
            self.prompter.ask(title_prompt).map(Selector::title)
        }
    }

    async fn search(&mut self) -> Result<()> {
        let Some(selector) = self.ask_selector("Search all movies? (y/n): ", "Title: ") else {
            return Ok(());
        };
        let movies = catalog::search(self.db, &selector).await?;
        output::print_movies(&movies);
        Ok(())
    }

    async fn add(&mut self) -> Result<()> {
        let Some([title, director, genre, year, rating]) = self.prompter.ask_fields([
            "Title: ",
            "Director: ",
            "Genre: ",
            "Year: ",
            "Rating (1.0 - 10.0): ",
        ]) else {
            return Ok(());
        };

        let movie = NewMovie::parse(&title, &director, &genre, &year, &rating)?;
        let stored = catalog::add(self.db, movie).await?;
        output::print_added(&stored);
        Ok(())
    }

    async fn modify(&mut self) -> Result<()> {
        let Some(query) = self.prompter.ask("Title of the movie to modify: ") else {
            return Ok(());
        };

        let prompter = &mut *self.prompter;
        let outcome = catalog::modify_with(self.db, &query, |matches| {
            output::print_movies(matches);
            let Some([title, director, genre, year, rating]) = prompter.ask_fields([
                &format!("New title{KEEP_HINT}: "),
                &format!("New director{KEEP_HINT}: "),
                &format!("New genre{KEEP_HINT}: "),
                &format!("New year{KEEP_HINT}: "),
                &format!("New rating (1.0 - 10.0){KEEP_HINT}: "),
            ]) else {
                return Ok(None);
            };
            FieldUpdates::parse(&title, &director, &genre, &year, &rating).map(Some)
        })
        .await?;

        output::print_modify(&outcome);
        Ok(())
    }

    async fn delete(&mut self) -> Result<()> {
        if self.prompter.confirm("Delete all movies? (y/n): ") {
            let removed = catalog::delete_all(self.db).await?;
            output::print_delete_all(removed);
            return Ok(());
        }

        let Some(query) = self.prompter.ask("Title of the movie to delete: ") else {
            return Ok(());
        };

        let prompter = &mut *self.prompter;
        let outcome = catalog::delete_matching(self.db, &query, |matches| {
            output::print_movies(matches);
            prompter.confirm(&format!("Delete \"{}\"? (y/n): ", matches[0].title))
        })
        .await?;

        output::print_delete(&outcome);
        Ok(())
    }

    async fn export(&mut self) -> Result<()> {
        let Some(selector) = self.ask_selector("Export all movies? (y/n): ", "Title: ") else {
            return Ok(());
        };
        let outcome =
            storage::export_movies(self.db, &self.config.files.export_path, &selector).await?;
        output::print_export(&outcome);
        Ok(())
    }
}
