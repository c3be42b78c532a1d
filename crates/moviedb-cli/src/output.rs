//! Rendering of operation reports

use moviedb_core::commands::{DeleteOutcome, ModifyOutcome, Movie};
use moviedb_core::report;
use moviedb_core::storage::{ExportOutcome, ImportReport};
use moviedb_core::Error;

const NO_DATA: &str = "No matching movies found.";

pub fn print_error(err: &Error) {
    eprintln!("Error [{}]: {}", err.code(), err);
    if let Some(suggestion) = err.suggestion() {
        eprintln!("  Hint: {}", suggestion);
    }
}

pub fn print_movies(movies: &[Movie]) {
    if movies.is_empty() {
        println!("{NO_DATA}");
    } else {
        print!("{}", report::format_table(movies));
    }
}

pub fn print_import(report: &ImportReport) {
    println!(
        "Imported {} movie(s) from {}",
        report.imported,
        report.source.display()
    );
}

pub fn print_added(movie: &Movie) {
    println!("Movie added: #{} {}", movie.id, movie.title);
}

pub fn print_modify(outcome: &ModifyOutcome) {
    match outcome {
        ModifyOutcome::Updated { after, matches, .. } => {
            if *matches > 1 {
                println!("{matches} movies matched; updated the first one.");
            }
            println!("Movie updated:");
            print_movies(std::slice::from_ref(after));
        }
        ModifyOutcome::Cancelled => println!("Nothing changed."),
        ModifyOutcome::NotFound => println!("{NO_DATA}"),
    }
}

pub fn print_delete_all(removed: u64) {
    println!("Deleted all movies ({removed} removed).");
}

pub fn print_delete(outcome: &DeleteOutcome) {
    match outcome {
        DeleteOutcome::Deleted(movie) => println!("Movie deleted: #{} {}", movie.id, movie.title),
        DeleteOutcome::Declined => println!("Nothing deleted."),
        DeleteOutcome::NotFound => println!("{NO_DATA}"),
    }
}

pub fn print_export(outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Exported(report) => println!(
            "Exported {} movie(s) to {} at {}",
            report.count,
            report.path.display(),
            report.exported_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        ExportOutcome::Empty => println!("{NO_DATA} Nothing exported."),
    }
}
