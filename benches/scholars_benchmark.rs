use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use scholars::core::directory::{HasherConfig, MemoryDirectory, SecretHasher};
use scholars::core::storage::MemoryStorage;
use scholars::core::{Builder, UserEntry};
use scholars::{AccessGuard, Identity, Navigator, Principal, Profile, Role, RouteTable};

pub fn decide(c: &mut Criterion) {
    const PATHS: [&str; 6] = [
        "/",
        "/student/dashboard",
        "/student/internships/internship-3/apply",
        "/organization/profile/edit",
        "/universities",
        "/unknown/path",
    ];

    let rt = rt();
    let navigator = rt.block_on(async { navigator(&[]) });
    let principal = Principal::User(Identity {
        id: "user-1".into(),
        name: "John Smith".into(),
        email: "student@example.com".into(),
        role: Role::Student,
        created_at: None,
        profile: Profile::default(),
    });

    c.bench_function("decide", |b| {
        b.iter(|| {
            for path in PATHS {
                navigator.decide(&principal, path);
            }
        });
    });
}

pub fn login(c: &mut Criterion) {
    const NUM_LOGIN: usize = 10;

    let rt = rt();
    let users = [UserEntry::new(
        "John Smith",
        "student@example.com",
        "password123",
        Role::Student,
    )];
    let mut navigator = rt.block_on(async { navigator(&users) });

    c.bench_function("login", |b| {
        b.iter(|| {
            rt.block_on(async {
                for _ in 0..NUM_LOGIN {
                    navigator
                        .login("student@example.com", "password123")
                        .await
                        .unwrap();
                    navigator.logout().await.unwrap();
                }
            });
        });
    });
}

// Call within the runtime, the session task is spawned on it.
fn navigator(users: &[UserEntry]) -> Navigator {
    let mut config = HasherConfig::default();
    config.set_memory_kib(Some(8));
    config.set_iterations(Some(1));
    config.set_parallelism(Some(1));
    let hasher = Arc::new(SecretHasher::new(&config).unwrap());

    let (handle, session) = Builder::new()
        .directory(Arc::new(
            MemoryDirectory::from_users(users, hasher.clone()).unwrap(),
        ))
        .hasher(hasher)
        .storage(Arc::new(MemoryStorage::new()))
        .build()
        .unwrap();
    tokio::spawn(session.run());

    Navigator::new(
        handle,
        RouteTable::default_table(&[Role::Student, Role::Organization]),
        AccessGuard::default(),
    )
}

fn rt() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
}

criterion_group!(benches, decide, login);
criterion_main!(benches);
