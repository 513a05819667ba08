use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use fe_core::ast::Module;
use fe_core::compiler::{CompiledFunction, CompiledModule, Compiler};
use fe_core::config::{CompilerConfig, EmitTarget};
use fe_core::errors::{print_compile_error, print_error};
use fe_core::logger::{self, LogLevel};

const DEFAULT_OUTPUT_DIR_NAME: &str = "output";
const FREE_FUNCTIONS_DIR_NAME: &str = "functions";

#[derive(Parser, Debug)]
#[command(name = "fec")]
#[command(version, about = "Type-check, lower and normalize a parsed module", long_about = None)]
struct Args {
    /// Parsed module as JSON, e.g. erc20.ast.json
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Directory to store the compiler output
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR_NAME)]
    output_dir: PathBuf,

    /// Comma separated outputs, e.g. -e normalized,asm
    #[arg(short, long, value_delimiter = ',')]
    emit: Option<Vec<EmitTarget>>,

    /// Overwrite contents of the output directory
    #[arg(long)]
    overwrite: bool,

    /// Compile functions one at a time
    #[arg(long)]
    sequential: bool,

    /// Print debug logs
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with compiler configuration
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let input = args.input.display().to_string();

    match run(args) {
        Ok(module) if module.is_ok() => {}
        Ok(module) => {
            for err in &module.errors {
                print_compile_error(&input, err);
            }
            std::process::exit(1);
        }
        Err(err) => {
            print_error(&input, &err);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<CompiledModule> {
    let mut config = match &args.config {
        Some(path) => CompilerConfig::from_json_file(path)?,
        None => CompilerConfig::default(),
    };
    if let Some(emit) = args.emit {
        config.emit = emit;
    }
    if args.sequential {
        config.parallel = false;
    }
    if args.verbose {
        config.log_level = LogLevel::Debug;
    }
    logger::init_with_level(config.log_level);

    let src = fs::read_to_string(&args.input)
        .with_context(|| format!("reading `{}`", args.input.display()))?;
    let module = Module::from_json(&src)
        .with_context(|| format!("parsing `{}`", args.input.display()))?;

    let compiled = Compiler::new(config.clone()).compile_module(&module);
    write_compiled_module(&module, &compiled, &config.emit, &args.output_dir, args.overwrite)?;
    info!(
        "Compiled {}. Outputs in `{}`",
        args.input.display(),
        args.output_dir.display()
    );
    Ok(compiled)
}

fn write_compiled_module(
    module: &Module,
    compiled: &CompiledModule,
    targets: &[EmitTarget],
    output_dir: &Path,
    overwrite: bool,
) -> Result<()> {
    if output_dir.is_file() {
        bail!(
            "A file exists at path `{}`, the location of the output directory. Refusing to overwrite.",
            output_dir.display()
        );
    }

    if !overwrite {
        verify_nonexistent_or_empty(output_dir)?;
    }
    verify_distinct_outputs(compiled, output_dir)?;

    fs::create_dir_all(output_dir)?;

    if targets.contains(&EmitTarget::Ast) {
        write_output(
            &output_dir.join("module.ast.json"),
            &serde_json::to_string_pretty(module)?,
        )?;
    }

    for func in &compiled.functions {
        let dir = function_dir(output_dir, func);
        fs::create_dir_all(&dir)?;

        for target in targets {
            if let Some(content) = render(func, *target)? {
                let file_name = format!("{}.{}", func.name, target.extension());
                write_output(&dir.join(file_name), &content)?;
            }
        }
    }

    Ok(())
}

fn function_dir(output_dir: &Path, func: &CompiledFunction) -> PathBuf {
    output_dir.join(func.contract.as_deref().unwrap_or(FREE_FUNCTIONS_DIR_NAME))
}

/// Two functions mapping to the same `<dir>/<name>` would overwrite each
/// other's files, e.g. a contract named `functions` next to a free function
/// of the same name.
fn verify_distinct_outputs(compiled: &CompiledModule, output_dir: &Path) -> Result<()> {
    let mut owners: HashMap<PathBuf, String> = HashMap::new();
    for func in &compiled.functions {
        let stem = function_dir(output_dir, func).join(&func.name);
        if let Some(previous) = owners.insert(stem.clone(), func.qualified_name()) {
            bail!(
                "`{}` and `{}` would both be written to `{}.*`. Refusing to overwrite.",
                previous,
                func.qualified_name(),
                stem.display()
            );
        }
    }
    Ok(())
}

fn render(func: &CompiledFunction, target: EmitTarget) -> Result<Option<String>> {
    let content = match target {
        EmitTarget::Ast => return Ok(None),
        EmitTarget::Tir => serde_json::to_string_pretty(&func.tir)?,
        EmitTarget::Lir => serde_json::to_string_pretty(&func.lir)?,
        EmitTarget::Normalized => serde_json::to_string_pretty(&func.normalized)?,
        EmitTarget::Cfg => func.code.to_dot(),
        EmitTarget::Asm => func.code.listing(),
    };
    Ok(Some(content))
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("writing `{}`", path.display()))
}

fn verify_nonexistent_or_empty(dir: &Path) -> Result<()> {
    if !dir.exists() || dir.read_dir()?.next().is_none() {
        Ok(())
    } else {
        bail!(
            "Directory '{}' is not empty. Use --overwrite to overwrite.",
            dir.display()
        )
    }
}
