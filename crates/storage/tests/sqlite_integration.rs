use exam_core::model::{
    AnswerMap, ExamIdentity, ExamResult, ExamType, SessionProgress, Subject,
};
use exam_core::time::fixed_now;
use storage::repository::{ProgressRepository, ResultHandoffRepository};
use storage::sqlite::SqliteRepository;

fn identity() -> ExamIdentity {
    ExamIdentity::new(Subject::English, 2024, ExamType::National)
}

fn progress(elapsed: u64) -> SessionProgress {
    SessionProgress::new(AnswerMap::from([(1, 2), (7, 4), (13, 1)]), elapsed, fixed_now())
}

#[tokio::test]
async fn sqlite_progress_round_trips() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_progress?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let id = identity();
    repo.save_progress(&id, &progress(420)).await.unwrap();

    let loaded = repo.load_progress(&id).await.unwrap().expect("stored");
    assert_eq!(loaded.answers, AnswerMap::from([(1, 2), (7, 4), (13, 1)]));
    assert_eq!(loaded.elapsed_seconds, 420);
    assert_eq!(loaded.saved_at, fixed_now());
}

#[tokio::test]
async fn sqlite_save_overwrites_and_clear_removes() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let id = identity();
    repo.save_progress(&id, &progress(60)).await.unwrap();
    repo.save_progress(&id, &progress(120)).await.unwrap();

    let loaded = repo.load_progress(&id).await.unwrap().expect("stored");
    assert_eq!(loaded.elapsed_seconds, 120);

    repo.clear_progress(&id).await.unwrap();
    assert!(repo.load_progress(&id).await.unwrap().is_none());
    // clearing again stays quiet
    repo.clear_progress(&id).await.unwrap();
}

#[tokio::test]
async fn sqlite_keys_progress_by_identity_triple() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_identity?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let national = identity();
    let local = ExamIdentity::new(Subject::English, 2024, ExamType::Local);
    repo.save_progress(&national, &progress(30)).await.unwrap();

    assert!(repo.load_progress(&local).await.unwrap().is_none());
    assert!(repo.load_progress(&national).await.unwrap().is_some());
}

#[tokio::test]
async fn sqlite_result_handoff_consumed_once() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_results?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let result = ExamResult {
        subject: Subject::AdminLaw,
        year: 2022,
        exam_type: ExamType::Local,
        total_questions: 20,
        answers: AnswerMap::from([(1, 1), (2, 3)]),
        correct_answers: vec![1, 2, 3, 4],
        elapsed_seconds: 1500,
        submitted_at: fixed_now(),
    };
    repo.put_result(&result).await.unwrap();

    let taken = repo.take_result().await.unwrap();
    assert_eq!(taken, Some(result));
    assert_eq!(repo.take_result().await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_put_result_replaces_prior() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_replace?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut result = ExamResult {
        subject: Subject::History,
        year: 2023,
        exam_type: ExamType::National,
        total_questions: 20,
        answers: AnswerMap::new(),
        correct_answers: vec![1; 20],
        elapsed_seconds: 100,
        submitted_at: fixed_now(),
    };
    repo.put_result(&result).await.unwrap();

    result.elapsed_seconds = 999;
    repo.put_result(&result).await.unwrap();

    let taken = repo.take_result().await.unwrap().expect("stored");
    assert_eq!(taken.elapsed_seconds, 999);
}
