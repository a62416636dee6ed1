use clap::{Parser, Subcommand};
use pbxgraph::views::Group;
use pbxgraph::{Document, ObjRef, ObjectKind, ALL_KINDS};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pbxgraph", about = "Inspect Xcode project object graphs (JSON-converted)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document metadata and per-kind object counts
    Info {
        input: PathBuf,
    },
    /// List native targets with their product types and build phases
    Targets {
        input: PathBuf,
    },
    /// Print the group hierarchy from the project's main group
    Tree {
        input: PathBuf,
    },
    /// Audit every reference edge; report dangling ids and unknown kinds
    Check {
        input: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    match Cli::parse().command {

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { input } => {
            let doc = Document::from_path(&input)?;
            println!("── Project document ────────────────────────────────────");
            println!("  Path             {}", input.display());
            println!("  Archive version  {}", doc.archive_version());
            println!("  Object version   {}", doc.object_version());
            println!("  Root object      {}", doc.root_object_id());
            println!("  Objects          {}", doc.len());
            for kind in ALL_KINDS {
                let count = doc.objects_of_kind(kind)?.len();
                if count > 0 {
                    println!("    {:<26} {}", kind.name(), count);
                }
            }
        }

        // ── Targets ──────────────────────────────────────────────────────────
        Commands::Targets { input } => {
            let doc = Document::from_path(&input)?;
            for target in doc.native_targets()? {
                let t = target.as_native_target()?;
                println!(
                    "{}  ({})",
                    t.name()?,
                    t.product_type()?.unwrap_or("no product type")
                );
                for phase in t.build_phases()? {
                    let p = phase.as_build_phase()?;
                    println!("    {:<26} {} file(s)", phase.kind().name(), p.files()?.len());
                }
            }
        }

        // ── Tree ─────────────────────────────────────────────────────────────
        Commands::Tree { input } => {
            let doc = Document::from_path(&input)?;
            let root = doc.root()?.as_project()?.main_group()?;
            print_tree(&root, 0)?;
        }

        // ── Check ────────────────────────────────────────────────────────────
        Commands::Check { input, json } => {
            let doc = Document::from_path(&input)?;
            let report = doc.audit();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} object(s), {} reference(s) checked",
                    doc.len(),
                    report.reference_count
                );
                for edge in &report.dangling {
                    println!("  dangling  {}.{} -> {}", edge.owner, edge.field, edge.target);
                }
                for unknown in &report.unknown {
                    println!("  unknown   {} ({})", unknown.id, unknown.isa);
                }
                if report.is_clean() {
                    println!("  no dangling references");
                }
            }
            if !report.is_clean() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn print_tree(node: &ObjRef, depth: usize) -> Result<(), Box<dyn std::error::Error>> {
    let indent = "  ".repeat(depth);
    match node.kind() {
        ObjectKind::Group | ObjectKind::VariantGroup => {
            let group: Group<'_> = node.as_group()?;
            println!("{indent}{}/", group.display_name()?);
            for child in group.children()? {
                print_tree(&child, depth + 1)?;
            }
        }
        ObjectKind::FileReference => {
            println!("{indent}{}", node.as_file_reference()?.display_name()?);
        }
        _ => {
            println!("{indent}{} ({})", node.id(), node.kind());
        }
    }
    Ok(())
}
