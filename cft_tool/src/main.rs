/***************************************************************************************************
 * Copyright (c) 2023, 2024 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice (including the next
 * paragraph) shall be included in all copies or substantial portions of the
 * Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * cft_tool: command line drivers for the configuration file tree.
 *
 * Reads and edits values in a CBOR configuration file addressed by slash-delimited pointers,
 * e.g. `cft_tool get device.cbor /network/name`. Exit status is 0 on success, 1 on any error.
 **************************************************************************************************/
extern crate cft_tree;
extern crate clap;

use cft_tree::{ConfigTree, Item};

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::Level;

/// Streaming editor for CBOR configuration files
#[derive(Debug, Parser)]
#[command(author, version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log traversal detail to stderr
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the value stored at a pointer
    #[command(arg_required_else_help = true)]
    Get {
        /// CBOR configuration file
        file: PathBuf,
        /// Pointer to read, e.g. /network/name
        pointer: String,
    },

    /// Overwrite the value at a pointer, inserting it if missing
    #[command(arg_required_else_help = true)]
    Set {
        /// CBOR configuration file
        file: PathBuf,
        /// Pointer to write, e.g. /network/name
        pointer: String,
        /// New value, stored as a text string
        value: String,
    },

    /// Remove a pointer, or a whole map subtree
    #[command(arg_required_else_help = true)]
    Erase {
        /// CBOR configuration file
        file: PathBuf,
        /// Pointer to remove
        pointer: String,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("fail to initialize logging: {}", e))?;

    if let Err(err) = run(cli.command) {
        println!("error({}): {}", err.code(), err);
        process::exit(1);
    }
    Ok(())
}

fn run(command: Commands) -> cft_tree::Result<()> {
    match command {
        Commands::Get { file, pointer } => {
            let mut tree = ConfigTree::open(&file)?;
            let item = tree.get_scalar(&pointer)?;
            println!("{} = {}", pointer, item);
            Ok(())
        }
        Commands::Set {
            file,
            pointer,
            value,
        } => {
            let mut tree = ConfigTree::open(&file)?;
            match tree.set_scalar(&pointer, Item::text(value))? {
                Some(old) => println!("{} set (was {})", pointer, old),
                None => println!("{} inserted", pointer),
            }
            Ok(())
        }
        Commands::Erase { file, pointer } => {
            let mut tree = ConfigTree::open(&file)?;
            tree.erase(&pointer)?;
            println!("{} erased", pointer);
            Ok(())
        }
    }
}
