#![allow(non_snake_case)]
use RustedQuadrature::Examples::quadrature_examples::FunctionCatalog;
use RustedQuadrature::Examples::quadrature_repl::run_repl;
use RustedQuadrature::Utils::logger::init_logger;
use RustedQuadrature::Utils::task_parser::{TaskDocument, load_task_file};
use log::{error, info};
use std::env;
use std::process;

/// solve every task of the document, true if all of them succeeded
fn run_tasks(document: &TaskDocument) -> bool {
    let engine = document.engine();
    let catalog = FunctionCatalog::new();
    let mut all_solved = true;
    for task in &document.tasks {
        info!(
            "{}: {} over {} .. {}, accuracy {}, {} rule, {} solution",
            task.title,
            task.function,
            task.bounds.left(),
            task.bounds.right(),
            task.accuracy,
            task.rule,
            task.solution
        );
        println!("{}", task.title);
        match task.solve(&engine, &catalog) {
            Ok(answer) => println!("{}", answer.to_table()),
            Err(err) => {
                all_solved = false;
                error!("{}: {}", task.title, err);
                println!("{}", err.user_message());
            }
        }
    }
    all_solved
}

fn main() {
    let args: Vec<String> = env::args().collect();
    match args.get(1) {
        // batch mode: RustedQuadrature <task file>
        Some(path) => {
            let document = match load_task_file(path) {
                Ok(document) => document,
                Err(err) => {
                    eprintln!("{}", err);
                    process::exit(2);
                }
            };
            if let Err(err) = init_logger(
                Some(document.settings.loglevel.as_str()),
                document.settings.log_file.as_deref(),
            ) {
                eprintln!("{}", err);
                process::exit(2);
            }
            if !run_tasks(&document) {
                process::exit(1);
            }
        }
        None => {
            // menu talks to the terminal itself, only errors are logged
            if let Err(err) = init_logger(Some("error"), None) {
                eprintln!("{}", err);
            }
            if let Err(err) = run_repl() {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
    }
}
