use crate::infra::Registries;
use clap::Args;
use internboard::board::applications::{ApplicationSubmission, StatusTally};
use internboard::board::jobs::{JobChanges, JobDraft};
use internboard::board::RegistryError;
use internboard::error::AppError;
use internboard::identity::{Identity, Role, UserId};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Title of the posting created by the demo admin
    #[arg(long, default_value = "Backend Intern")]
    pub(crate) title: String,
    /// Location of the posting
    #[arg(long, default_value = "Remote")]
    pub(crate) location: String,
    /// Stop after the review step and leave the posting open
    #[arg(long)]
    pub(crate) keep_open: bool,
}

fn person(id: &str, name: &str, role: Role) -> Identity {
    Identity {
        user_id: UserId(id.to_string()),
        role,
        name: name.to_string(),
        email: format!("{id}@internboard.local"),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        title,
        location,
        keep_open,
    } = args;

    let registries = Registries::in_memory();
    let admin = person("admin", "Board Admin", Role::Admin);
    let asha = person("asha", "Asha Rao", Role::Applicant);
    let dev = person("dev", "Dev Mehta", Role::Applicant);

    println!("Internship board demo");

    let job = registries.jobs.create(
        JobDraft {
            title: Some(title),
            description: Some("Build and operate REST services".to_string()),
            job_type: Some("Internship".to_string()),
            location: Some(location),
            ..JobDraft::default()
        },
        &admin,
    )?;
    println!(
        "\n{} posted {} \"{}\" ({}, {})",
        admin.name,
        job.id.0,
        job.title,
        job.job_type.label(),
        job.location
    );
    println!("  stipend: {}  duration: {}", job.stipend, job.duration);

    let submission = || ApplicationSubmission {
        job_id: Some(job.id.0.clone()),
        resume_link: Some("https://cv.internboard.local/asha.pdf".to_string()),
        cover_note: Some("Keen to work on backend systems".to_string()),
    };
    let application = registries.applications.apply(&asha, submission())?;
    println!(
        "\n{} applied: {} is {}",
        asha.name,
        application.application.id.0,
        application.application.status.label()
    );

    match registries.applications.apply(&asha, submission()) {
        Err(err @ RegistryError::Duplicate) => println!("  second attempt rejected: {err}"),
        Err(err) => return Err(err.into()),
        Ok(view) => println!("  unexpected second application {}", view.application.id.0),
    }

    registries
        .applications
        .update_status(&application.application.id, "Selected")?;
    let seen = registries
        .applications
        .get(&application.application.id, &asha)?;
    println!(
        "\n{} reviewed the application; {} now sees {}",
        admin.name,
        asha.name,
        seen.application.status.label()
    );

    if !keep_open {
        registries.jobs.update(
            &job.id,
            JobChanges {
                is_active: Some(false),
                ..JobChanges::default()
            },
        )?;
        println!("\n{} closed {}", admin.name, job.id.0);

        match registries.applications.apply(
            &dev,
            ApplicationSubmission {
                resume_link: Some("https://cv.internboard.local/dev.pdf".to_string()),
                ..submission()
            },
        ) {
            Err(err @ RegistryError::Inactive) => {
                println!("  {} could not apply: {err}", dev.name)
            }
            Err(err) => return Err(err.into()),
            Ok(view) => println!("  unexpected application {}", view.application.id.0),
        }
    }

    let mine = registries.applications.list_mine(&asha.user_id)?;
    let tally = StatusTally::count(mine.iter().map(|view| &view.application));
    println!(
        "\n{} dashboard: {} application(s), Applied {} / Shortlisted {} / Selected {} / Rejected {}",
        asha.name,
        mine.len(),
        tally.applied,
        tally.shortlisted,
        tally.selected,
        tally.rejected
    );

    Ok(())
}
