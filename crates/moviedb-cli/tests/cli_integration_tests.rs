//! CLI integration tests for moviedb
//!
//! Runs the `moviedb` binary end-to-end against throwaway databases.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Workspace for one test: an isolated config dir and database file
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn db(&self) -> String {
        self.path("movies.db").display().to_string()
    }

    /// Command pointed at this sandbox's config dir
    #[allow(deprecated)]
    fn base_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("moviedb").unwrap();
        cmd.current_dir(self.dir.path());
        cmd.env("MOVIEDB_CONFIG_DIR", self.path("config"));
        cmd.env_remove("MOVIEDB_DATABASE_PATH");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Command pointed at this sandbox's config dir and database
    fn cmd(&self) -> Command {
        let mut cmd = self.base_cmd();
        cmd.args(["--db", &self.db()]);
        cmd
    }

    fn add(&self, title: &str, director: &str, genre: &str, year: &str, rating: &str) {
        self.cmd()
            .args([
                "add",
                "--title",
                title,
                "--director",
                director,
                "--genre",
                genre,
                "--year",
                year,
                "--rating",
                rating,
            ])
            .assert()
            .success();
    }
}

#[test]
fn test_help_lists_commands() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_add_then_search() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args([
            "add",
            "--title",
            "Alien",
            "--director",
            "Ridley Scott",
            "--genre",
            "Sci-Fi",
            "--year",
            "1979",
            "--rating",
            "8.5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Movie added: #1 Alien"));

    sandbox
        .cmd()
        .args(["search", "--title", "ali"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alien"))
        .stdout(predicate::str::contains("Ridley Scott"))
        .stdout(predicate::str::contains("8.5"));
}

#[test]
fn test_whole_rating_shown_with_decimal() {
    let sandbox = Sandbox::new();
    sandbox.add("Heat", "Michael Mann", "Crime", "1995", "8");

    sandbox
        .cmd()
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("8.0"));
}

#[test]
fn test_add_out_of_range_rating_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args([
            "add", "--title", "X", "--director", "Y", "--genre", "Z", "--year", "2000",
            "--rating", "11.0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E100"))
        .stderr(predicate::str::contains("rating"));

    sandbox
        .cmd()
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching movies found."));
}

#[test]
fn test_add_non_numeric_year_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args([
            "add", "--title", "X", "--director", "Y", "--genre", "Z", "--year", "soon",
            "--rating", "5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("year 'soon' is not a whole number"));
}

#[test]
fn test_search_empty_catalog() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["search", "--title", "anything"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching movies found."));
}

#[test]
fn test_import_then_search() {
    let sandbox = Sandbox::new();
    let source = sandbox.path("seed.json");
    fs::write(
        &source,
        r#"[
            {"title": "Alien", "director": "Ridley Scott", "genre": "Sci-Fi", "year": 1979, "rating": 8.5},
            {"title": "Aliens", "director": "James Cameron", "genre": "Action", "year": 1986, "rating": 8.4}
        ]"#,
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["import", source.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 movie(s)"));

    sandbox
        .cmd()
        .args(["search", "-t", "Alien"])
        .assert()
        .success()
        .stdout(predicate::str::contains("James Cameron"))
        .stdout(predicate::str::contains("Ridley Scott"));
}

#[test]
fn test_import_missing_file_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["import", "nowhere.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E200"));
}

#[test]
fn test_import_malformed_json_fails() {
    let sandbox = Sandbox::new();
    let source = sandbox.path("broken.json");
    fs::write(&source, "[{\"title\": ").unwrap();

    sandbox
        .cmd()
        .args(["import", source.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E201"));
}

#[test]
fn test_import_uses_configured_default_path() {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.path("movies.json"),
        r#"[{"title": "Heat", "director": "Michael Mann", "genre": "Crime", "year": 1995, "rating": 8.3}]"#,
    )
    .unwrap();

    sandbox
        .cmd()
        .arg("import")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 movie(s)"));
}

#[test]
fn test_export_writes_file() {
    let sandbox = Sandbox::new();
    sandbox.add("Alien", "Ridley Scott", "Sci-Fi", "1979", "8.5");
    sandbox.add("Heat", "Michael Mann", "Crime", "1995", "8.3");
    let destination = sandbox.path("out").join("alien.json");

    sandbox
        .cmd()
        .args(["export", "--title", "alien", "-o", destination.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 movie(s)"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&destination).unwrap()).unwrap();
    let movies = written.as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "Alien");
    assert_eq!(movies[0]["id"], 1);
    assert_eq!(movies[0]["year"], 1979);
}

#[test]
fn test_export_nothing_matching_writes_no_file() {
    let sandbox = Sandbox::new();
    let destination = sandbox.path("empty.json");

    sandbox
        .cmd()
        .args(["export", "-o", destination.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing exported."));

    assert!(!destination.exists());
}

#[test]
fn test_modify_updates_given_fields() {
    let sandbox = Sandbox::new();
    sandbox.add("Alien", "Ridley Scott", "Sci-Fi", "1979", "8.5");

    sandbox
        .cmd()
        .args(["modify", "Alien", "--rating", "9.0", "--genre", "Horror"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Movie updated:"))
        .stdout(predicate::str::contains("Horror"));

    sandbox
        .cmd()
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ridley Scott"))
        .stdout(predicate::str::contains("9.0"));
}

#[test]
fn test_modify_invalid_rating_leaves_movie_unchanged() {
    let sandbox = Sandbox::new();
    sandbox.add("Alien", "Ridley Scott", "Sci-Fi", "1979", "8.5");

    sandbox
        .cmd()
        .args(["modify", "Alien", "--rating", "0.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E100"));

    sandbox
        .cmd()
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("8.5"));
}

#[test]
fn test_modify_no_match() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["modify", "Ghost", "--title", "Boo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching movies found."));
}

#[test]
fn test_delete_all_on_empty_catalog() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["delete", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted all movies (0 removed)."));
}

#[test]
fn test_delete_requires_query_or_all() {
    let sandbox = Sandbox::new();
    sandbox.cmd().arg("delete").assert().failure();
}

#[test]
fn test_delete_no_match() {
    let sandbox = Sandbox::new();
    sandbox.add("Alien", "Ridley Scott", "Sci-Fi", "1979", "8.5");

    sandbox
        .cmd()
        .args(["delete", "Ghost", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching movies found."));
}

#[test]
fn test_delete_with_yes_removes_first_match() {
    let sandbox = Sandbox::new();
    sandbox.add("Alien", "Ridley Scott", "Sci-Fi", "1979", "8.5");
    sandbox.add("Aliens", "James Cameron", "Action", "1986", "8.4");

    sandbox
        .cmd()
        .args(["delete", "Alien", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Movie deleted: #1 Alien"));

    sandbox
        .cmd()
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("James Cameron"))
        .stdout(predicate::str::contains("Ridley Scott").not());
}

#[test]
fn test_delete_declined_keeps_movie() {
    let sandbox = Sandbox::new();
    sandbox.add("Alien", "Ridley Scott", "Sci-Fi", "1979", "8.5");

    sandbox
        .cmd()
        .args(["delete", "Alien"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing deleted."));

    sandbox
        .cmd()
        .arg("search")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alien"));
}

#[test]
fn test_shell_exit() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .write_stdin("7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Movie Catalog"))
        .stdout(predicate::str::contains("Goodbye."));
}

#[test]
fn test_shell_ends_on_eof() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("shell")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye."));
}

#[test]
fn test_shell_rejects_unknown_option() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .write_stdin("9\n7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid option, please choose again."))
        .stdout(predicate::str::contains("Goodbye."));
}

#[test]
fn test_shell_add_and_search() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .write_stdin("3\nAlien\nRidley Scott\nSci-Fi\n1979\n8.5\n2\ny\n7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Movie added: #1 Alien"))
        .stdout(predicate::str::contains("Ridley Scott"));
}

#[test]
fn test_shell_reports_error_and_continues() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .write_stdin("3\nAlien\nRidley Scott\nSci-Fi\n1979\n11\n7\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("E100"))
        .stdout(predicate::str::contains("Goodbye."));
}

#[test]
fn test_unavailable_database_fails() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.path("blocker"), "not a directory").unwrap();
    let db = sandbox.path("blocker").join("movies.db");

    sandbox
        .base_cmd()
        .args(["--db", db.to_str().unwrap(), "search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E400"));
}

#[test]
fn test_config_set_get_list() {
    let sandbox = Sandbox::new();
    let config = sandbox.path("custom.toml");
    let config = config.to_str().unwrap();

    sandbox
        .cmd()
        .args(["--config", config, "config", "set", "files.export_path", "dump.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("files.export_path set to: dump.json"));

    sandbox
        .cmd()
        .args(["--config", config, "config", "get", "files.export_path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dump.json"));

    sandbox
        .cmd()
        .args(["--config", config, "config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("database.path = movies.db"))
        .stdout(predicate::str::contains("files.import_path = movies.json"));
}

#[test]
fn test_config_set_does_not_persist_db_override() {
    let sandbox = Sandbox::new();
    let config = sandbox.path("custom.toml");

    sandbox
        .cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "config",
            "set",
            "files.import_path",
            "seed.json",
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(&config).unwrap();
    assert!(contents.contains("path = \"movies.db\""));
    assert!(!contents.contains(&sandbox.db()));
}

#[test]
fn test_database_path_from_environment() {
    let sandbox = Sandbox::new();
    let db = sandbox.path("env.db");

    sandbox
        .base_cmd()
        .env("MOVIEDB_DATABASE_PATH", &db)
        .args(["delete", "--all"])
        .assert()
        .success();

    assert!(db.exists());
}

#[test]
fn test_config_unknown_key_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "get", "llm.model"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_config_reset_removes_file() {
    let sandbox = Sandbox::new();
    let config = sandbox.path("custom.toml");
    fs::write(&config, "[files]\nexport_path = \"dump.json\"\n").unwrap();

    sandbox
        .cmd()
        .args(["--config", config.to_str().unwrap(), "config", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration reset to defaults."));

    assert!(!config.exists());
}

#[test]
fn test_database_file_name_used_verbatim() {
    let sandbox = Sandbox::new();
    let db = sandbox.path("a%20b.db");

    sandbox
        .base_cmd()
        .args(["--db", db.to_str().unwrap(), "delete", "--all"])
        .assert()
        .success();

    assert!(db.exists());
    assert!(!sandbox.path("a b.db").exists());
}
