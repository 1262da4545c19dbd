//! Bean and shot subcommands.

use clap::{Args, Subcommand};

use barista_core::{MAX_RATING, ShotInput};

/// Bean management commands.
#[derive(Subcommand)]
pub enum BeanCommand {
    /// Add a bean
    Add {
        /// Bean name (e.g. "Kenya AA")
        #[arg(long)]
        name: String,
        /// Roaster name
        #[arg(long)]
        roaster: String,
    },

    /// List all beans
    List,
}

/// Shot commands.
#[derive(Subcommand)]
pub enum ShotCommand {
    /// Record a shot
    Add(ShotArgs),

    /// List shots, most recent first
    List {
        /// Only shots pulled with this bean id
        #[arg(long)]
        bean: Option<i64>,
        /// Only shots rated at least this high
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_RATING)))]
        min_rating: Option<u8>,
    },
}

/// Raw shot fields.
///
/// Numeric fields are kept as text so that parsing and range checks happen
/// in one place, `ShotInput::validate`.
#[derive(Args, Debug)]
pub struct ShotArgs {
    /// Bean id
    #[arg(long)]
    pub bean: String,
    /// Outer grinder setting
    #[arg(long = "grind-outside")]
    pub grind_outside: String,
    /// Inner grinder setting
    #[arg(long = "grind-inside")]
    pub grind_inside: String,
    /// Ground coffee amount
    #[arg(long = "grind-amount")]
    pub grind_amount: String,
    /// Dose in grams
    #[arg(long)]
    pub dose: String,
    /// Yield in grams
    #[arg(long = "yield")]
    pub yield_out: String,
    /// Extraction time in whole seconds
    #[arg(long)]
    pub time: String,
    /// Rating from 1 to 5 (0 or absent means unrated)
    #[arg(long, allow_negative_numbers = true)]
    pub rating: Option<String>,
    /// Taste tag, repeatable
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<ShotArgs> for ShotInput {
    fn from(args: ShotArgs) -> Self {
        Self {
            bean_id: Some(args.bean),
            grind_setting_outside: Some(args.grind_outside),
            grind_setting_inside: Some(args.grind_inside),
            grind_amount: Some(args.grind_amount),
            dose_in: Some(args.dose),
            yield_out: Some(args.yield_out),
            extraction_time: Some(args.time),
            rating: args.rating,
            tags: args.tags,
            notes: args.notes,
        }
    }
}
