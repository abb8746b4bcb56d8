//! Command handlers: parse input, call one core service, print.

use crate::args::{
    ClassCommand, Command, ExamCommand, NoteCommand, ProfileArgs, ProfileCommand, TaskCommand,
};
use anyhow::{bail, Context, Result};
use chrono::Local;
use log::info;
use studydesk_core::model::exam::{ExamDraft, SubjectMark, DEFAULT_EXAM_TYPE};
use studydesk_core::model::note::{NoteDraft, NotePatch};
use studydesk_core::model::profile::Profile;
use studydesk_core::model::task::{Task, TaskDraft, TaskPatch};
use studydesk_core::model::timetable::{ClassDraft, ClassSession};
use studydesk_core::service::dashboard::HomeDashboard;
use studydesk_core::views::filters::NoteFilter;
use studydesk_core::views::grading::display_percentage;
use studydesk_core::AppShell;

pub async fn dispatch(shell: &mut AppShell, command: Command) -> Result<()> {
    match command {
        Command::Onboard(args) => onboard(shell, args),
        Command::Reset { yes } => reset(shell, yes),
        other => {
            if shell.profile().is_none() {
                bail!("no profile yet; run `studydesk onboard` first");
            }
            match other {
                Command::Profile { action } => profile(shell, action),
                Command::Class { action } => class(shell, action),
                Command::Task { action } => task(shell, action),
                Command::Exam { action } => exam(shell, action),
                Command::Note { action } => note(shell, action).await,
                Command::Home { offline } => home(shell, offline).await,
                Command::Run => run(shell).await,
                Command::Onboard(_) | Command::Reset { .. } => Ok(()),
            }
        }
    }
}

fn profile_from(args: ProfileArgs) -> Profile {
    Profile::new(args.name, args.class_name, args.stream, args.goal)
}

fn onboard(shell: &mut AppShell, args: ProfileArgs) -> Result<()> {
    if shell.profile().is_some() {
        bail!("a profile already exists; use `studydesk profile set` to edit it");
    }
    let profile = shell.complete_onboarding(profile_from(args))?;
    println!("Welcome, {}!", profile.name);
    Ok(())
}

fn reset(shell: &mut AppShell, yes: bool) -> Result<()> {
    if !yes {
        bail!("refusing to delete all data without --yes");
    }
    shell.clear_all_data()?;
    println!("All data cleared.");
    Ok(())
}

fn profile(shell: &mut AppShell, action: ProfileCommand) -> Result<()> {
    match action {
        ProfileCommand::Show => {
            if let Some(profile) = shell.profile() {
                println!("Name:       {}", profile.name);
                println!("Class:      {}", profile.class_name);
                println!("Stream:     {}", profile.stream);
                println!("Daily goal: {}h", profile.daily_goal);
            }
        }
        ProfileCommand::Set(args) => {
            shell.update_profile(profile_from(args))?;
            println!("Profile updated.");
        }
    }
    Ok(())
}

fn print_class(class: &ClassSession) {
    println!(
        "{}  {:<9} {}-{}  {}{}",
        class.id,
        class.day,
        class.start_time,
        class.end_time,
        class.subject,
        class
            .room
            .as_deref()
            .map(|room| format!(" ({room})"))
            .unwrap_or_default()
    );
}

fn class(shell: &AppShell, action: ClassCommand) -> Result<()> {
    let mut timetable = shell.timetable()?;
    match action {
        ClassCommand::Add {
            subject,
            day,
            start,
            end,
            room,
            color,
        } => {
            let mut draft = ClassDraft::new(subject, day);
            if let Some(start) = start {
                draft.start_time = start;
            }
            if let Some(end) = end {
                draft.end_time = end;
            }
            if let Some(color) = color {
                draft.color = color;
            }
            draft.room = room;
            let class = timetable.create(draft)?;
            println!("Added class {}", class.id);
        }
        ClassCommand::List { day } => {
            let classes = match day {
                Some(day) => timetable.for_day(day),
                None => timetable.classes().iter().collect(),
            };
            if classes.is_empty() {
                println!("No classes scheduled.");
            }
            for class in classes {
                print_class(class);
            }
        }
        ClassCommand::Rm { id } => {
            timetable.delete(&id)?;
            println!("Removed.");
        }
    }
    Ok(())
}

fn print_task(task: &Task) {
    println!(
        "{}  [{}] {:<6} due {}  {}{}",
        task.id,
        if task.is_completed { "x" } else { " " },
        task.priority,
        task.due_date,
        task.title,
        if task.subject.is_empty() {
            String::new()
        } else {
            format!(" ({})", task.subject)
        }
    );
}

fn task(shell: &AppShell, action: TaskCommand) -> Result<()> {
    let mut tasks = shell.tasks()?;
    match action {
        TaskCommand::Add {
            title,
            subject,
            due,
            priority,
            notes,
        } => {
            let mut draft = TaskDraft::new(title);
            draft.subject = subject.unwrap_or_default();
            if let Some(due) = due {
                draft.due_date = due;
            }
            draft.priority = priority;
            draft.notes = notes;
            let task = tasks.create(draft)?;
            println!("Added task {}", task.id);
        }
        TaskCommand::List { completed } => {
            let listed = if completed {
                tasks.completed()
            } else {
                tasks.pending()
            };
            if listed.is_empty() {
                println!("Nothing here.");
            }
            for task in listed {
                print_task(task);
            }
        }
        TaskCommand::Done { id } => match tasks.toggle_completed(&id)? {
            Some(true) => println!("Marked done."),
            Some(false) => println!("Marked pending."),
            None => println!("No task with id {id}."),
        },
        TaskCommand::Rm { id } => {
            tasks.delete(&id)?;
            println!("Removed.");
        }
        TaskCommand::Edit {
            id,
            title,
            subject,
            due,
            priority,
            notes,
        } => {
            let patch = TaskPatch {
                title,
                subject,
                due_date: due,
                priority,
                is_completed: None,
                notes: notes.map(|notes| Some(notes).filter(|text| !text.trim().is_empty())),
            };
            match tasks.update(&id, patch)? {
                Some(task) => print_task(&task),
                None => println!("No task with id {id}."),
            }
        }
    }
    Ok(())
}

/// Parses `NAME:OBTAINED/MAX`.
fn parse_subject(raw: &str) -> Result<SubjectMark> {
    let (name, score) = raw
        .rsplit_once(':')
        .with_context(|| format!("expected NAME:OBTAINED/MAX, got `{raw}`"))?;
    let (obtained, max) = score
        .split_once('/')
        .with_context(|| format!("expected OBTAINED/MAX after `:`, got `{score}`"))?;
    let obtained = obtained
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid obtained mark `{obtained}`"))?;
    let max = max
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid max mark `{max}`"))?;
    if !obtained.is_finite() || !max.is_finite() {
        bail!("marks must be finite numbers, got `{score}`");
    }
    Ok(SubjectMark::new(name.trim(), obtained, max))
}

fn exam(shell: &AppShell, action: ExamCommand) -> Result<()> {
    let mut marks = shell.marks()?;
    match action {
        ExamCommand::Add {
            exam_type,
            date,
            subjects,
        } => {
            let subjects = subjects
                .iter()
                .map(|raw| parse_subject(raw))
                .collect::<Result<Vec<_>>>()?;
            let mut draft = ExamDraft::new(
                exam_type.unwrap_or_else(|| DEFAULT_EXAM_TYPE.to_string()),
                subjects,
            );
            if let Some(date) = date {
                draft.date = date;
            }
            let exam = marks.create(draft)?;
            println!(
                "Saved {}: {}% ({})",
                exam.id,
                display_percentage(exam.total_percentage),
                exam.grade
            );
        }
        ExamCommand::List => {
            if marks.exams().is_empty() {
                println!("No exams recorded.");
            }
            for exam in marks.exams() {
                println!(
                    "{}  {}  {:<12} {:>3}%  {}",
                    exam.id,
                    exam.date,
                    exam.exam_type,
                    display_percentage(exam.total_percentage),
                    exam.grade
                );
            }
        }
        ExamCommand::Rm { id } => {
            marks.delete(&id)?;
            println!("Removed.");
        }
        ExamCommand::Chart => {
            for point in marks.chart() {
                let bar = "#".repeat(usize::try_from(point.value / 5).unwrap_or(0));
                println!("{:<12} {:>3}% {bar}", point.label, point.value);
            }
        }
    }
    Ok(())
}

async fn note(shell: &AppShell, action: NoteCommand) -> Result<()> {
    let mut notes = shell.notes()?;
    match action {
        NoteCommand::Add {
            title,
            content,
            subject,
        } => {
            let mut draft = NoteDraft::new(title, content);
            draft.subject = subject.unwrap_or_default();
            let note = notes.create(draft)?;
            println!("Added note {}", note.id);
        }
        NoteCommand::List { search, favorites } => {
            let filter = NoteFilter {
                term: search.unwrap_or_default(),
                favorites_only: favorites,
            };
            for note in notes.search(&filter) {
                println!(
                    "{}  {} {}  {}",
                    note.id,
                    if note.is_favorite { "*" } else { " " },
                    note.title,
                    note.subject
                );
            }
        }
        NoteCommand::Fav { id } => match notes.toggle_favorite(&id)? {
            Some(favorite) => println!("Favourite: {favorite}"),
            None => println!("No note with id {id}."),
        },
        NoteCommand::Rm { id } => {
            notes.delete(&id)?;
            println!("Removed.");
        }
        NoteCommand::Edit {
            id,
            title,
            subject,
            content,
        } => {
            let patch = NotePatch {
                subject,
                title,
                content,
                is_favorite: None,
            };
            match notes.update(&id, patch)? {
                Some(note) => println!("Updated note {}", note.id),
                None => println!("No note with id {id}."),
            }
        }
        NoteCommand::Summarize { id } => {
            let Some(note) = notes.get(&id).cloned() else {
                bail!("no note with id {id}");
            };
            drop(notes);
            println!("{}", shell.summarize_note(&note.content).await);
        }
    }
    Ok(())
}

fn print_dashboard(dashboard: &HomeDashboard) {
    println!("Hello, {}!", dashboard.greeting_name);
    println!("\"{}\"", dashboard.motivation);
    println!();
    println!("{}'s classes:", dashboard.weekday);
    if dashboard.todays_classes.is_empty() {
        println!("  none");
    }
    for class in &dashboard.todays_classes {
        println!("  {}-{}  {}", class.start_time, class.end_time, class.subject);
    }
    println!("Pending tasks ({}):", dashboard.pending_total);
    for task in &dashboard.pending_preview {
        println!("  [{}] {} (due {})", task.priority, task.title, task.due_date);
    }
    if let Some(exam) = &dashboard.latest_exam {
        println!(
            "Latest exam: {} {}% ({})",
            exam.exam_type,
            display_percentage(exam.total_percentage),
            exam.grade
        );
    }
}

async fn home(shell: &AppShell, offline: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let Some(dashboard) = shell.dashboard(today)? else {
        return Ok(());
    };
    print_dashboard(&dashboard);
    if !offline {
        if let Some(advice) = shell.refresh_advice(&dashboard).await {
            println!();
            println!("Advice: {advice}");
        }
    }
    Ok(())
}

async fn run(shell: &mut AppShell) -> Result<()> {
    shell.activate();
    let today = Local::now().date_naive();
    if let Some(dashboard) = shell.dashboard(today)? {
        print_dashboard(&dashboard);
        if let Some(handle) = shell.spawn_advice_refresh(&dashboard) {
            if matches!(handle.await, Ok(true)) {
                println!();
                println!("Advice: {}", shell.advice_board().current());
            }
        }
    }
    info!("event=cli_run module=cli status=ok chiming={}", shell.is_chiming());
    println!();
    println!("Running; press Ctrl-C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    shell.teardown();
    Ok(())
}
