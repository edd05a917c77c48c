use chrono::{Local, NaiveDate};
use school_holidays::calendar::DATE_FORMAT;
use school_holidays::{
    Configuration, HolidayTable, Language, StatusSnapshot, device_info, entity_views,
    load_config_from_json, load_table_from_csv, load_table_from_json, resolve, resolve_now,
    save_config_to_json, save_table_to_csv, save_table_to_json,
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

const ENTRY_ID: &str = "cli";

fn render_row<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    for (ci, cell) in cells.enumerate() {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(widths[ci].saturating_sub(cell.chars().count())));
        line.push_str(" |");
    }
    line
}

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&widths, headers.iter().copied()));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(&widths, row.iter().map(String::as_str)));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  status                             Resolve today's status\n  check <YYYY-MM-DD>                 Resolve the status of a date\n  entities                           Show entity views for today\n  holidays                           List the holiday table\n  lang <he|en>                       Set language\n  elementary <true|false>            Enable/disable elementary school entity\n  high <true|false>                  Enable/disable high school entity\n  friday <true|false>                Treat Fridays as high school vacation\n  config show                        Show configuration\n  config load <json_path>            Load configuration from JSON file\n  config save <json_path>            Save configuration to JSON file\n  table load <json|csv> <path>       Load holiday table from disk\n  table save <json|csv> <path>       Save holiday table to disk\n  quit|exit                          Exit"
    );
}

fn print_snapshot(snapshot: &StatusSnapshot) {
    println!("Date               : {}", snapshot.date);
    println!("Elementary vacation: {}", snapshot.elementary_vacation);
    println!("High vacation      : {}", snapshot.high_vacation);
    println!("Summary            : {}", snapshot.summary);
    println!("Computed at        : {}", snapshot.computed_at.format("%Y-%m-%dT%H:%M:%S"));
}

fn print_config(config: &Configuration) {
    println!(
        "Language           : {} ({})",
        config.language,
        config.language.native_name()
    );
    println!("Elementary school  : {}", config.elementary_enabled);
    println!("High school        : {}", config.high_enabled);
    println!("Friday high school : {}", config.friday_high_enabled);
}

fn print_holidays(table: &HolidayTable) {
    let rows: Vec<Vec<String>> = table
        .records()
        .iter()
        .map(|record| {
            vec![
                record.start.clone().unwrap_or_default(),
                record.end.clone().unwrap_or_default(),
                record
                    .high
                    .as_ref()
                    .map(|flag| flag.is_set().to_string())
                    .unwrap_or_default(),
                record.summary.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print!("{}", render_text_table(&["START", "END", "HIGH", "SUMMARY"], &rows));
    if let Some((start, end)) = table.coverage() {
        println!("Coverage           : {start} .. {end}");
    }
}

fn print_entities(config: &Configuration, snapshot: &StatusSnapshot) {
    let device = device_info(ENTRY_ID, config.language);
    println!("Device             : {} ({} {})", device.name, device.model, device.sw_version);
    let rows: Vec<Vec<String>> = entity_views(ENTRY_ID, config, Some(snapshot))
        .into_iter()
        .map(|view| {
            let state = match view.is_on() {
                Some(true) => "on".to_string(),
                Some(false) => "off".to_string(),
                None => snapshot.summary.clone(),
            };
            vec![view.entity_id, view.name.to_string(), state]
        })
        .collect();
    print!("{}", render_text_table(&["entity_id", "name", "state"], &rows));
}

fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value?.to_ascii_lowercase().as_str() {
        "true" | "on" => Some(true),
        "false" | "off" => Some(false),
        _ => None,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut table = HolidayTable::bundled();
    let mut config = Configuration::default();

    println!("School Holidays (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "status" => print_snapshot(&resolve_now(&table, &config)),
            "check" => match parts.next() {
                Some(date_s) => {
                    let date = match NaiveDate::parse_from_str(date_s, DATE_FORMAT) {
                        Ok(d) => d,
                        Err(_) => {
                            println!("Invalid date (YYYY-MM-DD)");
                            continue;
                        }
                    };
                    let snapshot = resolve(date, &table, &config, Local::now().naive_local());
                    print_snapshot(&snapshot);
                }
                None => println!("Usage: check <YYYY-MM-DD>"),
            },
            "entities" => print_entities(&config, &resolve_now(&table, &config)),
            "holidays" => print_holidays(&table),
            "lang" => match parts.next().and_then(Language::parse_tag) {
                Some(language) => {
                    config.language = language;
                    println!("Language set to {language}.");
                }
                None => println!("Usage: lang <he|en>"),
            },
            "elementary" | "high" | "friday" => match parse_flag(parts.next()) {
                Some(value) => {
                    match cmd {
                        "elementary" => config.elementary_enabled = value,
                        "high" => config.high_enabled = value,
                        _ => config.friday_high_enabled = value,
                    }
                    println!("{cmd} set to {value}.");
                }
                None => println!("Usage: {cmd} <true|false>"),
            },
            "config" => match (parts.next(), parts.next()) {
                (Some("show"), _) => print_config(&config),
                (Some("load"), Some(path)) => match load_config_from_json(path) {
                    Ok(loaded) => {
                        config = loaded;
                        println!("Configuration loaded from {path}.");
                        print_config(&config);
                    }
                    Err(e) => println!("Error: {}", e),
                },
                (Some("save"), Some(path)) => match save_config_to_json(&config, path) {
                    Ok(_) => println!("Configuration saved to {path}."),
                    Err(e) => println!("Error: {}", e),
                },
                _ => println!("Usage: config <show|load <path>|save <path>>"),
            },
            "table" => match (parts.next(), parts.next(), parts.next()) {
                (Some("load"), Some(format), Some(path)) => {
                    let loaded = match format {
                        "json" => load_table_from_json(path),
                        "csv" => load_table_from_csv(path),
                        _ => {
                            println!("Unknown format '{format}' (json|csv)");
                            continue;
                        }
                    };
                    match loaded {
                        Ok(loaded) => {
                            table = loaded;
                            println!("Holiday table loaded from {path} ({} records).", table.len());
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                }
                (Some("save"), Some(format), Some(path)) => {
                    let saved = match format {
                        "json" => save_table_to_json(&table, path),
                        "csv" => save_table_to_csv(&table, path),
                        _ => {
                            println!("Unknown format '{format}' (json|csv)");
                            continue;
                        }
                    };
                    match saved {
                        Ok(_) => println!("Holiday table saved to {path}."),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                _ => println!("Usage: table <load|save> <json|csv> <path>"),
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
