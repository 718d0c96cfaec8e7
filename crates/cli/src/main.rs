use clap::{Parser, Subcommand};
use anyhow::{Context, Result};
use rayon::prelude::*;

use pedigree_graph_core::{Multipedigree, Pedigree, SexCode};

#[derive(Parser)]
#[command(name = "pedgraph")]
#[command(version)]
#[command(about = "Structural summaries and consistency checks for pedigree files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every pedigree in a file and summarize its structure
    Summary {
        /// Path to pedigree CSV (columns: pedigree, id, parent1, parent2, optional sex)
        #[arg(short, long)]
        input: String,

        /// Output format: "text" (default) or "json"
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Report build errors; exits non-zero when any are found
    Check {
        /// Path to pedigree CSV (columns: pedigree, id, parent1, parent2, optional sex)
        #[arg(short, long)]
        input: String,

        /// Also list warnings
        #[arg(long)]
        warnings: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { input, format } => cmd_summary(&input, &format),
        Commands::Check { input, warnings } => {
            let errors = cmd_check(&input, warnings)?;
            if errors > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// One row of a pedigree file.
#[derive(Debug, Clone, PartialEq)]
struct Record {
    pedigree: String,
    id: String,
    parent1: Option<String>,
    parent2: Option<String>,
    sex: SexCode,
}

/// Read a pedigree CSV.
///
/// Header names are case-insensitive. The `pedigree` column is optional;
/// without it every row belongs to pedigree `1`. A missing parent is written
/// as empty, `0`, `NA` or `.`.
fn read_records(path: &str) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let pedigree_col = column("pedigree");
    let id_col = column("id").context("CSV missing 'id' column")?;
    let parent1_col = column("parent1").context("CSV missing 'parent1' column")?;
    let parent2_col = column("parent2").context("CSV missing 'parent2' column")?;
    let sex_col = column("sex");

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let field = |col: usize| record.get(col).unwrap_or("");

        let id = field(id_col);
        if id.is_empty() {
            anyhow::bail!("Row {} has an empty id", row + 1);
        }
        let sex = sex_col.map_or(SexCode::Missing, |col| parse_sex(field(col)));

        records.push(Record {
            pedigree: pedigree_col.map_or("1", field).to_string(),
            id: id.to_string(),
            parent1: parse_parent(field(parent1_col)),
            parent2: parse_parent(field(parent2_col)),
            sex,
        });
    }
    Ok(records)
}

fn parse_parent(raw: &str) -> Option<String> {
    match raw {
        "" | "0" | "NA" | "." => None,
        s => Some(s.to_string()),
    }
}

/// Anything other than a male or female code is a missing sex.
fn parse_sex(raw: &str) -> SexCode {
    match raw.to_uppercase().as_str() {
        "M" | "1" | "MALE" => SexCode::Male,
        "F" | "2" | "FEMALE" => SexCode::Female,
        _ => SexCode::Missing,
    }
}

/// Declare every record, then its lineage, and build.
fn load(path: &str) -> Result<Multipedigree> {
    let records = read_records(path)
        .with_context(|| format!("Failed to load pedigree file '{}'", path))?;
    eprintln!("Loaded {} records from '{}'", records.len(), path);

    let mut mp: Multipedigree = Multipedigree::new();
    for r in &records {
        mp.add_member(&r.pedigree, &r.id, r.sex)?;
    }
    for r in &records {
        match (&r.parent1, &r.parent2) {
            (Some(p1), Some(p2)) => mp.add_lineage_pair(&r.pedigree, &r.id, p1, p2)?,
            (Some(p), None) | (None, Some(p)) => mp.add_lineage(&r.pedigree, &r.id, p)?,
            (None, None) => {}
        }
    }
    mp.build().context("Failed to build pedigrees")?;
    mp.freeze()?;
    Ok(mp)
}

#[derive(Debug, Clone, PartialEq)]
struct Summary {
    name: String,
    members: usize,
    founders: usize,
    synthesized: usize,
    families: usize,
    subpedigrees: usize,
    unconnected: usize,
    errors: usize,
    warnings: usize,
}

fn summarize(ped: &Pedigree) -> Summary {
    Summary {
        name: ped.name().to_string(),
        members: ped.member_count(),
        founders: ped.members().filter(|m| m.is_founder()).count(),
        synthesized: ped.members().filter(|m| m.is_synthesized()).count(),
        families: ped.family_count(),
        subpedigrees: ped.subpedigree_count(),
        unconnected: ped.unconnected_count(),
        errors: ped.error_count(),
        warnings: ped.warning_count(),
    }
}

fn cmd_summary(input: &str, output_format: &str) -> Result<()> {
    let mp = load(input)?;
    let summaries: Vec<Summary> = mp.par_pedigrees()?.map(summarize).collect();

    match output_format.to_lowercase().as_str() {
        "json" => print_json(&mp, &summaries)?,
        _ => print_text(&mp, &summaries),
    }
    Ok(())
}

fn print_text(mp: &Multipedigree, summaries: &[Summary]) {
    println!(
        "{} pedigrees, {} members, largest sibship {}",
        mp.pedigree_count(),
        mp.member_count(),
        mp.max_sibship_size()
    );
    println!(
        "{:<16} {:>8} {:>8} {:>6} {:>8} {:>6} {:>6} {:>6} {:>6}",
        "pedigree", "members", "founders", "added", "families", "subs", "alone", "errors", "warns"
    );
    for s in summaries {
        println!(
            "{:<16} {:>8} {:>8} {:>6} {:>8} {:>6} {:>6} {:>6} {:>6}",
            s.name,
            s.members,
            s.founders,
            s.synthesized,
            s.families,
            s.subpedigrees,
            s.unconnected,
            s.errors,
            s.warnings
        );
    }
}

fn print_json(mp: &Multipedigree, summaries: &[Summary]) -> Result<()> {
    let mut map = serde_json::Map::new();
    map.insert("n_pedigrees".to_string(), serde_json::json!(mp.pedigree_count()));
    map.insert("n_members".to_string(), serde_json::json!(mp.member_count()));
    map.insert("max_sibship".to_string(), serde_json::json!(mp.max_sibship_size()));

    let peds: Vec<serde_json::Value> = summaries
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.name,
                "members": s.members,
                "founders": s.founders,
                "synthesized": s.synthesized,
                "families": s.families,
                "subpedigrees": s.subpedigrees,
                "unconnected": s.unconnected,
                "errors": s.errors,
                "warnings": s.warnings,
            })
        })
        .collect();
    map.insert("pedigrees".to_string(), serde_json::json!(peds));

    let json_str = serde_json::to_string_pretty(&serde_json::Value::Object(map))?;
    println!("{}", json_str);
    Ok(())
}

/// Print findings pedigree by pedigree. Returns the number of errors.
fn cmd_check(input: &str, show_warnings: bool) -> Result<usize> {
    let mp = load(input)?;
    for i in 0..mp.pedigree_count() {
        let Some(ped) = mp.pedigree_index(i) else {
            continue;
        };
        for issue in ped.errors() {
            println!("{}: error: {}", ped.name(), issue);
        }
        if show_warnings {
            for issue in ped.warnings() {
                println!("{}: warning: {}", ped.name(), issue);
            }
        }
    }

    let errors = mp.error_count();
    if errors > 0 {
        log::warn!("{} errors in '{}'", errors, input);
    }
    eprintln!("{} errors in {} pedigrees", errors, mp.pedigree_count());
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn write_temp_csv(content: &str) -> String {
        let dir = std::env::temp_dir();
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        let file_name = format!("test_pedgraph_{}_{}.csv", std::process::id(), id);
        let path = dir.join(file_name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_read_records() {
        let path = write_temp_csv("Pedigree,ID,Parent1,Parent2,Sex\nf,A,0,0,M\nf,B,,,2\nf,C,A,B,\ng,X,NA,.,F\n");
        let records = read_records(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].sex, SexCode::Male);
        assert_eq!(records[1].sex, SexCode::Female);
        assert_eq!(records[2].parent1.as_deref(), Some("A"));
        assert_eq!(records[2].sex, SexCode::Missing);
        assert_eq!(records[3].parent1, None);
        assert_eq!(records[3].parent2, None);
    }

    #[test]
    fn test_missing_pedigree_column_uses_one_pedigree() {
        let path = write_temp_csv("id,parent1,parent2,sex\nA,0,0,M\nB,0,0,F\nC,A,B,\n");
        let mp = load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mp.pedigree_count(), 1);
        let summary = summarize(mp.pedigree_find("1").unwrap());
        assert_eq!(summary.members, 3);
        assert_eq!(summary.founders, 2);
        assert_eq!(summary.families, 1);
        assert_eq!(summary.subpedigrees, 1);
        assert_eq!(summary.errors, 0);
    }

    #[test]
    fn test_check_counts_errors() {
        let path = write_temp_csv("pedigree,id,parent1,parent2,sex\nf,A,B,0,M\nf,B,A,0,F\n");
        let errors = cmd_check(&path, true).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(errors, 2);
    }

    #[test]
    fn test_unknown_sex_codes_are_missing() {
        assert_eq!(parse_sex("m"), SexCode::Male);
        assert_eq!(parse_sex("Female"), SexCode::Female);
        assert_eq!(parse_sex("9"), SexCode::Missing);
        assert_eq!(parse_sex("?"), SexCode::Missing);
    }
}
