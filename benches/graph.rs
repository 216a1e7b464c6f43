use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chrono::NaiveDate;
use landgraph::identity::IdentityTable;
use landgraph::model::ContributorProjectLink;
use landgraph::people::people_window;
use landgraph::window::RecencyWindow;

fn landscape(projects: usize, people_per_project: usize) -> Vec<ContributorProjectLink> {
    let mut links = Vec::with_capacity(projects * people_per_project);
    for p in 0..projects {
        for i in 0..people_per_project {
            // overlapping teams so most people share several projects
            let person = (p * 7 + i) % (people_per_project * 4);
            links.push(ContributorProjectLink {
                contributor: format!("dev{person}@example.com"),
                project: format!("project-{p}"),
                total_commits: 10,
                commits_30_days: 2,
                commits_90_days: 5,
                latest_commit_date: "2024-06-20".to_string(),
                first_commit_date: "2022-01-01".to_string(),
                commits_this_year: 4,
                commits_per_year: Default::default(),
            });
        }
    }
    links
}

fn bench_people_window(c: &mut Criterion) {
    let window = RecencyWindow::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    let links = landscape(200, 25);

    c.bench_function("people_window_200x25", |b| {
        b.iter(|| {
            let mut identities = IdentityTable::new();
            black_box(people_window(black_box(&links), &mut identities, &window, 30))
        })
    });
}

criterion_group!(benches, bench_people_window);
criterion_main!(benches);
