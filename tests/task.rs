use std::time::{Duration, Instant};

use logplot::data::task::{BackgroundTask, TaskPoll};

fn settle<T>(task: &BackgroundTask<T>) -> TaskPoll<T> {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        match task.poll() {
            TaskPoll::Pending if Instant::now() < deadline => {
                std::thread::sleep(Duration::from_millis(5))
            }
            other => return other,
        }
    }
}

#[test]
fn result_is_handed_back() {
    let task = BackgroundTask::spawn("answer", None, || 6 * 7).unwrap();
    assert_eq!(task.name(), "answer");
    assert!(matches!(settle(&task), TaskPoll::Ready(42)));
}

#[test]
fn slow_worker_is_pending_first() {
    let task = BackgroundTask::spawn("slow", None, || {
        std::thread::sleep(Duration::from_millis(200));
        "done".to_string()
    })
    .unwrap();
    assert!(matches!(task.poll(), TaskPoll::Pending));
    assert!(matches!(settle(&task), TaskPoll::Ready(s) if s == "done"));
}

#[test]
fn panicking_worker_is_reported_lost() {
    let task: BackgroundTask<u32> =
        BackgroundTask::spawn("boom", None, || panic!("worker failed")).unwrap();
    assert!(matches!(settle(&task), TaskPoll::Lost));
}
