// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, Subcommand};

use cqasm_ast::make::*;
use cqasm_ast::{BinaryOp, SourceLocation, Statement};
use cqasm_semantics::Analyzer;

#[derive(Parser)]
#[command(name = "semdemo")]
#[command(about = "Demo of the cQASM semantic analyzer.")]
#[command(long_about = "
Demo of the cQASM semantic analyzer.

Commands are `instructions`, `functions` and `demo`.
`instructions` lists the instructions and gate modifiers of the default analyzer.
`functions` lists the default functions and operators.
`demo` analyzes one of a few built-in programs and prints the ASG or the diagnostics.
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List instruction overloads and gate modifiers
    Instructions,

    /// List function and operator overloads
    Functions,

    /// Analyze a built-in program
    Demo {
        #[arg(value_name = "NAME", default_value = "bell")]
        /// one of `bell`, `modifiers`, `errors`
        name: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let analyzer = Analyzer::with_defaults();

    match &cli.command {
        Some(Commands::Instructions) => {
            for (_, overloads) in analyzer.global_scope().instruction_table.iter() {
                for overload in overloads {
                    println!("{}", overload.tag());
                }
            }
            for (name, overloads) in analyzer.global_scope().gate_modifier_table.iter() {
                for overload in overloads {
                    let params: Vec<String> =
                        overload.param_types().iter().map(|t| t.to_string()).collect();
                    println!("modifier {}({})", name, params.join(", "));
                }
            }
        }

        Some(Commands::Functions) => {
            for (_, overloads) in analyzer.global_scope().core_function_table.iter() {
                for overload in overloads {
                    println!("{}", overload.tag());
                }
            }
        }

        Some(Commands::Demo { name }) => {
            let Some((source, statements)) = demo_program(name) else {
                eprintln!("unknown demo program '{name}'");
                std::process::exit(2);
            };
            let result = analyzer.analyze(&program_v3(statements));
            if result.any_errors() {
                let file_name = format!("{name}.cq");
                if let Err(err) = result.print_errors(&file_name, source) {
                    eprintln!("failed to print diagnostics: {err}");
                }
                std::process::exit(1);
            }
            if let Some(root) = result.root {
                root.print_asg_debug_pretty();
            }
        }

        None => {}
    }
}

// Statements of a demo program sit on the lines after the version line.
fn at_line(statement: Statement, line: u32, width: u32) -> Statement {
    let location = SourceLocation::from_lines(line, 1, line, width.max(1));
    match statement {
        Statement::Variable(s) => Statement::Variable(s.with_location(location)),
        Statement::GateInstruction(s) => Statement::GateInstruction(s.with_location(location)),
        Statement::NonGateInstruction(s) => {
            Statement::NonGateInstruction(s.with_location(location))
        }
        Statement::Assignment(s) => Statement::Assignment(s.with_location(location)),
        Statement::Block(s) => Statement::Block(s.with_location(location)),
    }
}

const BELL: &str = "\
version 3.0
qubit[2] q
bit[2] b
H q[0]
CNOT q[0], q[1]
b = measure q
";

const MODIFIERS: &str = "\
version 3.0
qubit[2] q
Rz(pi / 4) q[1]
inv.S q[0]
ctrl.pow(0.5).X q[0], q[1]
";

const ERRORS: &str = "\
version 3.0
qubit[2] q
X q[2]
inv.CZ q[0]
Rx r
";

fn demo_program(name: &str) -> Option<(&'static str, Vec<Statement>)> {
    let (source, statements) = match name {
        "bell" => (
            BELL,
            vec![
                qubits("q", 2),
                bits("b", 2),
                gate_instruction(gate("H"), vec![index("q", &[0])]),
                gate_instruction(gate("CNOT"), vec![index("q", &[0]), index("q", &[1])]),
                measure(name_ref("b"), name_ref("q")),
            ],
        ),
        "modifiers" => (
            MODIFIERS,
            vec![
                qubits("q", 2),
                gate_instruction(
                    gate_with_param("Rz", binary(BinaryOp::Division, name_ref("pi"), int(4))),
                    vec![index("q", &[1])],
                ),
                gate_instruction(modified("inv", None, gate("S")), vec![index("q", &[0])]),
                gate_instruction(
                    modified("ctrl", None, modified("pow", Some(float(0.5)), gate("X"))),
                    vec![index("q", &[0]), index("q", &[1])],
                ),
            ],
        ),
        "errors" => (
            ERRORS,
            vec![
                qubits("q", 2),
                gate_instruction(gate("X"), vec![index("q", &[2])]),
                gate_instruction(modified("inv", None, gate("CZ")), vec![index("q", &[0])]),
                gate_instruction(gate("Rx"), vec![name_ref("r")]),
            ],
        ),
        _ => return None,
    };
    let statements = statements
        .into_iter()
        .zip(source.lines().skip(1).zip(2..))
        .map(|(statement, (text, line))| at_line(statement, line, text.len() as u32))
        .collect();
    Some((source, statements))
}
