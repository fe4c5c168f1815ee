use gitid_testing::{ConfigFile, TestRepo, TestWorld, fixtures};
use gitid_types::Rule;

/// `~/work/**` -> work, `github.com/oss-org/tool` -> personal
pub fn world() -> TestWorld {
    TestWorld::new().with_config(
        ConfigFile::new()
            .identity(fixtures::work_identity())
            .identity(fixtures::personal_identity())
            .rule(Rule::directory("~/work/**", "work"))
            .rule(Rule::remote("github.com/oss-org/tool", "personal")),
    )
}

/// Tracks `origin/main`: one pushed commit as work, two local commits as personal
pub fn diverged_repo(world: &TestWorld) -> TestRepo {
    let repo = world.init_repo_with_origin("work/api").unwrap();
    repo.commit_as("Alice Smith", "alice@work.com", "Initial commit")
        .unwrap();
    repo.push_upstream().unwrap();
    repo.commit_as("Alice", "alice@home.net", "Add endpoint").unwrap();
    repo.commit_as("Alice", "alice@home.net", "Fix typo").unwrap();
    repo
}
