//! Line-oriented front-end for the registry. This layer owns everything the
//! core deliberately does not: prompting, trimming, normalizing the national
//! id and gender, and rendering rows and error messages. Each command opens
//! its own connection and lets it drop when the command finishes, so the
//! database file is never held across the idle prompt.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::db::{
    delete_person, fetch_persons, insert_person, open_registry, search_persons, update_person,
    Criterion,
};
use crate::error::RegistryError;
use crate::models::{NewPerson, Person};
use crate::validate::{normalize_gender, normalize_national_id};

const HELP: &str = "Commands:
  add             register a new person
  update <id>     overwrite the person with the given id
  delete <id>     remove the person with the given id
  list            show every registered person
  search          find persons by name, national id or id
  help            show this message
  quit            exit";

/// Drive the prompt loop until the user quits or input ends.
pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    writeln!(output, "Person registry. Type 'help' for commands.")?;
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = read_line(&mut input)? else {
            return Ok(());
        };
        if line == "quit" || line == "exit" {
            return Ok(());
        }
        if line.is_empty() {
            continue;
        }

        // A fresh connection per command keeps acquisition scoped to the
        // operation; dropping it releases the file even on error paths.
        let conn = open_registry()?;
        if let Err(err) = dispatch(&conn, &line, &mut input, &mut output)? {
            writeln!(output, "{err}")?;
        }
    }
}

/// Parse one command line and run it. The outer `Result` carries I/O and
/// bootstrap failures that should end the loop; the inner one carries
/// recoverable registry errors the loop renders and survives.
fn dispatch(
    conn: &Connection,
    line: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Result<(), RegistryError>> {
    let (command, argument) = match line.split_once(' ') {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command {
        "add" => add(conn, input, output),
        "update" => match parse_id(argument) {
            Some(id) => update(conn, id, input, output),
            None => usage(output, "usage: update <id>"),
        },
        "delete" => match parse_id(argument) {
            Some(id) => Ok(delete_person(conn, id)),
            None => usage(output, "usage: delete <id>"),
        },
        "list" => {
            let rows = match fetch_persons(conn) {
                Ok(rows) => rows,
                Err(err) => return Ok(Err(err)),
            };
            render_rows(output, &rows)?;
            Ok(Ok(()))
        }
        "search" => search(conn, input, output),
        "help" => usage(output, HELP),
        _ => usage(output, "Unknown command. Type 'help' for commands."),
    }
}

fn add(
    conn: &Connection,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Result<(), RegistryError>> {
    let person = match read_person(input, output)? {
        Ok(person) => person,
        Err(err) => return Ok(Err(err)),
    };
    match insert_person(conn, &person) {
        Ok(person) => {
            writeln!(output, "Registered: {person}")?;
            Ok(Ok(()))
        }
        Err(err) => Ok(Err(err)),
    }
}

fn update(
    conn: &Connection,
    id: i64,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Result<(), RegistryError>> {
    let person = match read_person(input, output)? {
        Ok(person) => person,
        Err(err) => return Ok(Err(err)),
    };
    Ok(update_person(conn, id, &person))
}

/// Reproduce the search dialog: one term, applied to whichever of the three
/// fields the user picks, OR-combined. The id criterion only participates
/// when the term is all digits.
fn search(
    conn: &Connection,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Result<(), RegistryError>> {
    let term = prompt_field(input, output, "Search term")?;
    if term.is_empty() {
        return usage(output, "Type a term to search for.");
    }
    let fields = prompt_field(input, output, "Fields to match (any of: name, nid, id)")?;

    let mut criteria = Vec::new();
    for field in fields.split_whitespace() {
        match field {
            "name" => criteria.push(Criterion::NameContains(term.clone())),
            "nid" => criteria.push(Criterion::NationalIdContains(term.clone())),
            "id" => {
                if let Some(id) = parse_id(&term) {
                    criteria.push(Criterion::IdEquals(id));
                }
            }
            other => {
                writeln!(output, "Ignoring unknown field '{other}'.")?;
            }
        }
    }

    let rows = match search_persons(conn, &criteria) {
        Ok(rows) => rows,
        Err(err) => return Ok(Err(err)),
    };
    render_rows(output, &rows)?;
    Ok(Ok(()))
}

/// Prompt for the six form fields, trim them, and apply the caller-side
/// normalization the validator expects: punctuation stripped from the
/// national id and the gender uppercased.
fn read_person(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Result<NewPerson, RegistryError>> {
    let name = prompt_field(input, output, "Name")?;
    let age = prompt_field(input, output, "Age")?;
    let national_id = normalize_national_id(&prompt_field(input, output, "National id")?);
    let gender = normalize_gender(&prompt_field(input, output, "Gender (M/F/O)")?);
    let email = prompt_field(input, output, "Email")?;
    let phone = prompt_field(input, output, "Phone")?;

    Ok(NewPerson::from_form(
        &name,
        &age,
        &national_id,
        &gender,
        &email,
        &phone,
    ))
}

fn prompt_field(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> Result<String> {
    write!(output, "{label}: ")?;
    output.flush()?;
    Ok(read_line(input)?.unwrap_or_default())
}

/// Read one trimmed line, or `None` once input is exhausted.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line.trim().to_string()))
    }
}

fn render_rows(output: &mut impl Write, rows: &[Person]) -> Result<()> {
    if rows.is_empty() {
        writeln!(output, "No persons found.")?;
        return Ok(());
    }
    for person in rows {
        writeln!(output, "{person}")?;
    }
    Ok(())
}

fn parse_id(argument: &str) -> Option<i64> {
    argument.parse().ok()
}

fn usage(output: &mut impl Write, message: &str) -> Result<Result<(), RegistryError>> {
    writeln!(output, "{message}")?;
    Ok(Ok(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use std::io::Cursor;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        init_schema(&conn).expect("init schema");
        conn
    }

    fn run_command(conn: &Connection, line: &str, typed: &str) -> (Result<(), RegistryError>, String) {
        let mut input = Cursor::new(typed.to_string());
        let mut output = Vec::new();
        let outcome = dispatch(conn, line, &mut input, &mut output).expect("dispatch");
        (outcome, String::from_utf8(output).expect("utf8 output"))
    }

    #[test]
    fn add_normalizes_and_persists() {
        let conn = test_conn();
        let (outcome, output) = run_command(
            &conn,
            "add",
            "Ana\n30\n123.456.789-01\nf\na@b.com\n11999990000\n",
        );
        assert_eq!(outcome, Ok(()));
        assert!(output.contains("ID: 1 | Name: Ana"));

        let rows = fetch_persons(&conn).expect("list");
        assert_eq!(rows[0].national_id, "12345678901");
        assert_eq!(rows[0].gender, "F");
    }

    #[test]
    fn add_surfaces_validation_errors_without_touching_the_store() {
        let conn = test_conn();
        let (outcome, _) = run_command(&conn, "add", "Ana\n30\n123\nF\na@b.com\n11999990000\n");
        assert_eq!(outcome, Err(RegistryError::InvalidNationalId));
        assert!(fetch_persons(&conn).expect("list").is_empty());
    }

    #[test]
    fn search_skips_the_id_criterion_for_non_numeric_terms() {
        let conn = test_conn();
        run_command(
            &conn,
            "add",
            "Ana\n30\n12345678901\nF\na@b.com\n11999990000\n",
        );

        let (outcome, output) = run_command(&conn, "search", "An\nname id\n");
        assert_eq!(outcome, Ok(()));
        assert!(output.contains("Name: Ana"));
    }

    #[test]
    fn delete_requires_a_numeric_id() {
        let conn = test_conn();
        let (outcome, output) = run_command(&conn, "delete", "");
        assert_eq!(outcome, Ok(()));
        assert!(output.contains("usage: delete <id>"));
    }
}
