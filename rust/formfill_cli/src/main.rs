// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

mod cli;
mod fields_cmd;
mod fill_cmd;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    shared::init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Fields { ref file, format } => fields_cmd::run(file, format),
        cli::Commands::Fill {
            ref template,
            ref values,
            ref output,
            strict,
            no_need_appearances,
            mirror_widget_values,
            force,
        } => {
            let options = formfill_core::FillOptions {
                need_appearances: !no_need_appearances,
                mirror_widget_values,
                strict,
            };
            fill_cmd::run(template, values, output, &options, force)
        }
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
