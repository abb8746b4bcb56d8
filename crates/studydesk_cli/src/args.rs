//! CLI argument definitions for `studydesk`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use studydesk_core::model::profile::{Stream, DEFAULT_DAILY_GOAL};
use studydesk_core::model::task::Priority;
use studydesk_core::model::timetable::Weekday;

#[derive(Parser, Debug)]
#[command(
    name = "studydesk",
    version,
    about = "Timetable, tasks, marks and notes for students"
)]
pub struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database file, overriding `[storage] db_path`
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the student profile (first run).
    Onboard(ProfileArgs),
    /// Show or edit the profile.
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
    /// Manage the weekly timetable.
    Class {
        #[command(subcommand)]
        action: ClassCommand,
    },
    /// Manage tasks.
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Record exam results.
    Exam {
        #[command(subcommand)]
        action: ExamCommand,
    },
    /// Manage study notes.
    Note {
        #[command(subcommand)]
        action: NoteCommand,
    },
    /// Print the home dashboard.
    Home {
        /// Skip the advice request
        #[arg(long)]
        offline: bool,
    },
    /// Print the dashboard, then keep the chime pulse running until Ctrl-C.
    Run,
    /// Delete every stored record and return to onboarding.
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: String,
    /// Class level: 9th, 10th, 11th, 12th or College
    #[arg(long = "class", value_name = "LEVEL")]
    pub class_name: String,
    /// Science, Commerce, Arts or Other
    #[arg(long)]
    pub stream: Stream,
    /// Daily study goal in hours (1-12)
    #[arg(long, default_value_t = DEFAULT_DAILY_GOAL)]
    pub goal: u8,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    Set(ProfileArgs),
}

#[derive(Debug, Subcommand)]
pub enum ClassCommand {
    Add {
        subject: String,
        /// Day name or three-letter abbreviation
        #[arg(long)]
        day: Weekday,
        #[arg(long, value_name = "HH:MM")]
        start: Option<String>,
        #[arg(long, value_name = "HH:MM")]
        end: Option<String>,
        #[arg(long)]
        room: Option<String>,
        /// Hex colour, defaults to the first palette colour
        #[arg(long)]
        color: Option<String>,
    },
    /// List classes, optionally for one day
    List {
        #[arg(long)]
        day: Option<Weekday>,
    },
    Rm {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    Add {
        title: String,
        #[arg(long)]
        subject: Option<String>,
        /// Due date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        due: Option<String>,
        #[arg(long, default_value = "Medium")]
        priority: Priority,
        #[arg(long)]
        notes: Option<String>,
    },
    List {
        /// Show completed tasks instead of pending ones
        #[arg(long)]
        completed: bool,
    },
    /// Toggle completion
    Done {
        id: String,
    },
    Rm {
        id: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExamCommand {
    Add {
        /// Exam type, e.g. "Unit Test"
        #[arg(long = "type")]
        exam_type: Option<String>,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Subject marks as NAME:OBTAINED/MAX, repeatable
        #[arg(long = "subject", value_name = "NAME:OBTAINED/MAX", required = true)]
        subjects: Vec<String>,
    },
    List,
    Rm {
        id: String,
    },
    /// Percentages of the most recent exams
    Chart,
}

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    Add {
        title: String,
        content: String,
        #[arg(long)]
        subject: Option<String>,
    },
    List {
        /// Case-insensitive search over title and content
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        favorites: bool,
    },
    /// Toggle favourite
    Fav {
        id: String,
    },
    Rm {
        id: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Ask the advisor for a short summary
    Summarize {
        id: String,
    },
}
