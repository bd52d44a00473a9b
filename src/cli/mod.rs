//! The one user-facing operation: look a song up, let the user pick a match,
//! copy the lyrics out.

use clap::Args;
use crossterm::{
    execute,
    style::{Color, ResetColor, SetForegroundColor},
};
use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use tracing::debug;

use crate::config::Config;
use crate::core::find::{FindOptions, Finder};
use crate::core::song::Song;
use crate::error::{Result, SelectionError};
use crate::utils::clipboard;
use crate::utils::progress::{ProgressMessages, ProgressUtils};

#[derive(Args)]
pub struct FindArgs {
    /// Search phrase, song title, or direct song URL
    #[arg(value_name = "QUERY")]
    query: String,

    /// Maximum number of matching songs to retrieve
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=30))]
    matches: Option<u8>,

    /// Insert a blank line after every N non-blank lyric lines
    #[arg(short = 'i', long, value_name = "N")]
    interval: Option<NonZeroUsize>,

    /// Remove instructional markers ([Chorus], <x2>, ...) from the lyrics
    #[arg(short, long)]
    clean: bool,

    /// Print the lyrics as well as copying them
    #[arg(short, long)]
    show: bool,

    /// Use the first match without prompting
    #[arg(short, long)]
    first: bool,

    /// Fetch through the song's HTML page instead of the wp-json API
    #[arg(long)]
    legacy: bool,
}

pub async fn execute(args: FindArgs, config: &Config) -> Result<()> {
    let finder = Finder::new(config);
    let options = FindOptions {
        matches: args.matches.unwrap_or(config.max_matches),
        division_interval: args
            .interval
            .map(NonZeroUsize::get)
            .unwrap_or(config.division_interval),
        clean: args.clean || config.clean,
    };
    debug!("Looking up {:?} with {:?}", args.query, options);

    let spinner = ProgressUtils::create_lookup_spinner();
    spinner.set_message(ProgressMessages::FORMING);
    let outcome = if args.legacy {
        spinner.set_message(ProgressMessages::SCRAPING);
        finder.scrape(&args.query, &options).await.map(|song| vec![song])
    } else {
        spinner.set_message(ProgressMessages::FINDING);
        finder.find(&args.query, &options).await
    };
    spinner.finish_and_clear();
    let songs = outcome?;

    let Some(song) = select_song(&songs, args.first)? else {
        println!("No song selected.");
        return Ok(());
    };

    let lyrics = song.content();
    if args.show {
        println!("{song}\n");
        println!("{lyrics}");
        println!();
    }

    clipboard::copy(lyrics)?;
    confirm_copied();
    Ok(())
}

/// A single result (or `--first`) is taken directly; multiple results get a
/// numbered prompt. Blank input or `q` means "no selection", which is a
/// successful exit.
fn select_song(songs: &[Song], use_first: bool) -> Result<Option<&Song>> {
    if songs.len() == 1 || use_first {
        return Ok(Some(&songs[0]));
    }

    print_matches(songs);
    print!("Select a song [1-{}] (blank or q to quit): ", songs.len());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    match parse_selection(&input, songs.len())? {
        Some(index) => Ok(Some(&songs[index])),
        None => Ok(None),
    }
}

/// Interpret one line of disambiguation input: blank or `q` is an explicit
/// "no selection", a number in 1..=max picks that song (returned
/// zero-based), anything else is a selection error.
fn parse_selection(
    input: &str,
    max: usize,
) -> std::result::Result<Option<usize>, SelectionError> {
    let input = input.trim();

    if input.is_empty() || input.eq_ignore_ascii_case("q") {
        return Ok(None);
    }

    match input.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(Some(n - 1)),
        _ => Err(SelectionError::OutOfRange {
            input: input.to_string(),
            max,
        }),
    }
}

fn print_matches(songs: &[Song]) {
    let _ = execute!(io::stdout(), SetForegroundColor(Color::Yellow));
    println!("Found {} song(s):", songs.len());
    let _ = execute!(io::stdout(), ResetColor);
    for (i, song) in songs.iter().enumerate() {
        print!("  ");
        let _ = execute!(io::stdout(), SetForegroundColor(Color::Yellow));
        print!("{:>2}.", i + 1);
        let _ = execute!(io::stdout(), ResetColor);
        println!(" {}", song.title());
    }
}

fn confirm_copied() {
    let _ = execute!(io::stdout(), SetForegroundColor(Color::Yellow));
    println!("Lyrics copied to clipboard!");
    let _ = execute!(io::stdout(), ResetColor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_q_input_means_no_selection() {
        for input in ["", "\n", "  \n", "q", "Q\n"] {
            assert_eq!(parse_selection(input, 5).unwrap(), None, "input {input:?}");
        }
    }

    #[test]
    fn in_range_numbers_pick_zero_based_index() {
        assert_eq!(parse_selection("1\n", 5).unwrap(), Some(0));
        assert_eq!(parse_selection("5", 5).unwrap(), Some(4));
    }

    #[test]
    fn out_of_range_input_is_a_selection_error() {
        for input in ["0", "6", "-1", "two"] {
            let err = parse_selection(input, 5).unwrap_err();
            assert!(
                matches!(&err, SelectionError::OutOfRange { max: 5, .. }),
                "input {input:?} gave {err}"
            );
        }
    }
}
