//! Command-line front end for [`cinline_core`]: macroizes every viable `inline` function in a C
//! translation unit and rewrites its callers to match, writing the result to standard output or a
//! chosen file.

#![warn(missing_docs)]

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use cinline_core::driver::Config;
use cinline_core::preprocess::PreprocessOptions;
use clap::{Arg, ArgAction, Command};

mod error;

use error::Error;

fn run() -> Result<(), Error> {
	let matches = Command::new(env!("CARGO_PKG_NAME"))
		.version(env!("CARGO_PKG_VERSION"))
		.author(env!("CARGO_PKG_AUTHORS"))
		.about(env!("CARGO_PKG_DESCRIPTION"))
		.arg_required_else_help(true)
		.arg(Arg::new("file").help("The C source file to rewrite").index(1).required(true))
		.arg(
			Arg::new("output_file")
				.help("Where to write the rewritten source; defaults to standard output")
				.short('o')
				.long("output")
				.action(ArgAction::Set),
		)
		.arg(
			Arg::new("cpp_flag")
				.help("An extra flag forwarded verbatim to the preprocessor, may be repeated")
				.long("cpp-flag")
				.action(ArgAction::Append),
		)
		.arg(
			Arg::new("record_trace_dir")
				.help("Write the pretty-printed AST after every pass into this directory")
				.long("record-trace-dir")
				.action(ArgAction::Set),
		)
		.get_matches();

	let input_path = matches.get_one::<String>("file").map(PathBuf::from).expect("required");
	let extra_flags: Vec<String> =
		matches.get_many::<String>("cpp_flag").map(|vals| vals.cloned().collect()).unwrap_or_default();
	let record_dir = matches.get_one::<String>("record_trace_dir").map(PathBuf::from);

	let config = Config {
		preprocess: PreprocessOptions { extra_flags, ..PreprocessOptions::default() },
		record_dir,
	};

	let rewritten = cinline_core::rewrite_file(&input_path, &config)?;

	match matches.get_one::<String>("output_file").map(PathBuf::from) {
		Some(output_path) => fs::write(&output_path, rewritten).map_err(cinline_core::error::Error::from)?,
		None => std::io::stdout().write_all(rewritten.as_bytes()).map_err(cinline_core::error::Error::from)?,
	}

	Ok(())
}

fn main() {
	fern::Dispatch::new()
		.format(|out, msg, record| out.finish(format_args!("[{}] {}", record.level(), msg)))
		.chain(std::io::stderr())
		.level(log::LevelFilter::Debug)
		.apply()
		.unwrap_or_else(|err| {
			eprintln!("logger initialisation failed\n{:?}", err);
			std::process::exit(1)
		});

	match run() {
		Ok(_) => (),
		Err(e) => {
			eprintln!("{}", e);
			std::process::exit(1);
		},
	}
}
