//! End-to-end hiring flow through the public registry facade: an admin posts
//! an internship, applicants apply, the admin reviews and closes the posting.

mod common {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use internboard::board::{
        ApplicationService, InMemoryApplicationRepository, InMemoryJobRepository,
        InMemoryUserDirectory, JobService, SteppingClock,
    };
    use internboard::identity::{Identity, Role, UserId};

    pub(super) type Jobs = JobService<InMemoryJobRepository, InMemoryUserDirectory>;
    pub(super) type Applications = ApplicationService<
        InMemoryApplicationRepository,
        InMemoryJobRepository,
        InMemoryUserDirectory,
    >;

    pub(super) fn registries() -> (Arc<Jobs>, Applications) {
        let clock = Arc::new(SteppingClock::new(
            Utc.with_ymd_and_hms(2025, 7, 1, 8, 0, 0).unwrap(),
            Duration::seconds(30),
        ));
        let users = Arc::new(InMemoryUserDirectory::default());
        let jobs = Arc::new(JobService::with_clock(
            Arc::new(InMemoryJobRepository::default()),
            users.clone(),
            clock.clone(),
        ));
        let applications = ApplicationService::with_clock(
            Arc::new(InMemoryApplicationRepository::default()),
            jobs.clone(),
            users,
            clock,
        );
        (jobs, applications)
    }

    pub(super) fn identity(id: &str, role: Role) -> Identity {
        Identity {
            user_id: UserId(id.to_string()),
            role,
            name: format!("{id} name"),
            email: format!("{id}@campus.example"),
        }
    }
}

use common::*;
use internboard::board::applications::{ApplicationFilter, ApplicationStatus, ApplicationSubmission};
use internboard::board::jobs::domain::NOT_SPECIFIED;
use internboard::board::jobs::{JobChanges, JobDraft, JobFilter, JobType};
use internboard::board::RegistryError;
use internboard::identity::Role;

fn backend_intern() -> JobDraft {
    JobDraft {
        title: Some("Backend Intern".to_string()),
        description: Some("Work on the payments API".to_string()),
        job_type: Some("Internship".to_string()),
        location: Some("Remote".to_string()),
        ..JobDraft::default()
    }
}

#[test]
fn admin_posts_reviews_and_closes_an_internship() {
    let (jobs, applications) = registries();
    let admin = identity("admin-1", Role::Admin);
    let first = identity("student-1", Role::Applicant);
    let second = identity("student-2", Role::Applicant);

    let job = jobs.create(backend_intern(), &admin).expect("job created");
    assert!(job.is_active);
    assert!(job.skills.is_empty());
    assert_eq!(job.stipend, NOT_SPECIFIED);
    assert_eq!(job.duration, NOT_SPECIFIED);
    assert_eq!(job.job_type, JobType::Internship);
    assert_eq!(job.created_by, admin.user_id);

    let fetched = jobs.get(&job.id).expect("job readable");
    assert_eq!(fetched.job, job);

    let submitted = applications
        .apply(
            &first,
            ApplicationSubmission {
                job_id: Some(job.id.0.clone()),
                resume_link: Some("https://x/y".to_string()),
                cover_note: None,
            },
        )
        .expect("application accepted");
    assert_eq!(submitted.application.status, ApplicationStatus::Applied);

    applications
        .update_status(&submitted.application.id, "Selected")
        .expect("admin selects");
    let seen = applications
        .get(&submitted.application.id, &first)
        .expect("applicant reads own application");
    assert_eq!(seen.application.status, ApplicationStatus::Selected);

    jobs.update(
        &job.id,
        JobChanges {
            is_active: Some(false),
            ..JobChanges::default()
        },
    )
    .expect("job closed");

    let late = applications.apply(
        &second,
        ApplicationSubmission {
            job_id: Some(job.id.0.clone()),
            resume_link: Some("https://x/z".to_string()),
            cover_note: None,
        },
    );
    assert!(matches!(late, Err(RegistryError::Inactive)));
    assert_eq!(
        applications
            .list_all(&ApplicationFilter::default(), Default::default())
            .expect("list")
            .len(),
        1
    );
}

#[test]
fn search_matches_title_or_description_anywhere() {
    let (jobs, _) = registries();
    let admin = identity("admin-1", Role::Admin);

    jobs.create(backend_intern(), &admin).expect("created");
    jobs.create(
        JobDraft {
            title: Some("Data Analyst".to_string()),
            description: Some("Summer INTERNship with the BI team".to_string()),
            job_type: Some("Internship".to_string()),
            location: Some("Pune".to_string()),
            ..JobDraft::default()
        },
        &admin,
    )
    .expect("created");
    jobs.create(
        JobDraft {
            title: Some("Platform Engineer".to_string()),
            description: Some("Full-time role".to_string()),
            job_type: Some("Job".to_string()),
            location: Some("Pune".to_string()),
            ..JobDraft::default()
        },
        &admin,
    )
    .expect("created");

    let found = jobs
        .list(&JobFilter {
            search: Some("intern".to_string()),
            ..JobFilter::default()
        })
        .expect("list");
    let titles: Vec<_> = found.iter().map(|view| view.job.title.as_str()).collect();
    assert_eq!(titles, vec!["Data Analyst", "Backend Intern"]);

    let in_pune = jobs
        .list(&JobFilter {
            location: Some("pune".to_string()),
            job_type: Some("Job".to_string()),
            ..JobFilter::default()
        })
        .expect("list");
    assert_eq!(in_pune.len(), 1);
    assert_eq!(in_pune[0].job.title, "Platform Engineer");
}

#[test]
fn simultaneous_submissions_store_one_application() {
    let (jobs, applications) = registries();
    let job = jobs
        .create(backend_intern(), &identity("admin-1", Role::Admin))
        .expect("created");
    let student = identity("student-1", Role::Applicant);
    let (applications, student, job_id) = (&applications, &student, &job.id);

    let outcomes: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|attempt| {
                scope.spawn(move || {
                    applications.apply(
                        student,
                        ApplicationSubmission {
                            job_id: Some(job_id.0.clone()),
                            resume_link: Some(format!("https://cv.example/{attempt}")),
                            cover_note: None,
                        },
                    )
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread completes"))
            .collect()
    });

    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .filter(|outcome| outcome.is_err())
        .all(|outcome| matches!(outcome, Err(RegistryError::Duplicate))));
    assert_eq!(
        applications
            .list_mine(&student.user_id)
            .expect("list")
            .len(),
        1
    );
}
