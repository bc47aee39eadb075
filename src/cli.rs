// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use clap::Subcommand;

use benkyo_core::error::Fallible;

use crate::cmd::aggregate::aggregate_collections;
use crate::cmd::filter::FilterChoice;
use crate::cmd::filter::set_filter;
use crate::cmd::index::rebuild_index;
use crate::cmd::mark::clear_learned;
use crate::cmd::mark::mark_focus;
use crate::cmd::mark::mark_learned;
use crate::cmd::reorganize::reorganize_collection;
use crate::cmd::shuffle::shuffle_collection;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::cmd::view::ViewFormat;
use crate::cmd::view::print_view;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Print a collection's deterministic view.
    View {
        /// Collection name or file name.
        collection: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = ViewFormat::Text)]
        format: ViewFormat,
    },
    /// Shuffle a collection, or clear its stored shuffle.
    Shuffle {
        /// Collection name or file name.
        collection: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// Shuffle under this seed. By default, a fresh seed is drawn from the clock.
        #[arg(long, conflicts_with = "clear")]
        seed: Option<u32>,
        /// Clear the stored shuffle and return to natural order.
        #[arg(long)]
        clear: bool,
    },
    /// Set a collection's study filter.
    Filter {
        /// Collection name or file name.
        collection: String,
        /// Which filter to apply.
        filter: FilterChoice,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Commands relating to study-progress tags.
    Mark {
        #[command(subcommand)]
        command: MarkCommand,
    },
    /// Consolidate a collection file by grouping entries under shared defaults.
    Reorganize {
        /// Path to the collection file.
        file: String,
        /// Field(s) forming the composite grouping key.
        #[arg(long, required = true)]
        by: Vec<String>,
        /// Optional output path. By default, the input file is rewritten in place.
        #[arg(long)]
        output: Option<String>,
    },
    /// Merge every collection in a directory into a single flat collection.
    Aggregate {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Name of the merged collection.
        #[arg(long)]
        name: String,
        /// Only include collections with this category.
        #[arg(long)]
        category: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Rebuild the collection index file.
    Index {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
}

#[derive(Subcommand)]
enum MarkCommand {
    /// Tag a study key as learned.
    Learned {
        /// Collection name or file name.
        collection: String,
        /// The study key to tag.
        key: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// Remove the tag instead of setting it.
        #[arg(long)]
        remove: bool,
    },
    /// Tag a study key as focus.
    Focus {
        /// Collection name or file name.
        collection: String,
        /// The study key to tag.
        key: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// Remove the tag instead of setting it.
        #[arg(long)]
        remove: bool,
    },
    /// Remove the learned tag from every key in a collection.
    ClearLearned {
        /// Collection name or file name.
        collection: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::View {
            collection,
            directory,
            format,
        } => print_view(directory, &collection, format),
        Command::Shuffle {
            collection,
            directory,
            seed,
            clear,
        } => shuffle_collection(directory, &collection, seed, clear),
        Command::Filter {
            collection,
            filter,
            directory,
        } => set_filter(directory, &collection, filter),
        Command::Mark { command } => match command {
            MarkCommand::Learned {
                collection,
                key,
                directory,
                remove,
            } => mark_learned(directory, &collection, &key, remove),
            MarkCommand::Focus {
                collection,
                key,
                directory,
                remove,
            } => mark_focus(directory, &collection, &key, remove),
            MarkCommand::ClearLearned {
                collection,
                directory,
            } => clear_learned(directory, &collection),
        },
        Command::Reorganize { file, by, output } => reorganize_collection(&file, &by, output),
        Command::Aggregate {
            directory,
            name,
            category,
            output,
        } => aggregate_collections(directory, name, category, output),
        Command::Index { directory } => rebuild_index(directory),
        Command::Stats { directory, format } => print_stats(directory, format),
    }
}
