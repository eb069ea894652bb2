use uuid::Uuid;

use praxis_api::error::ApiError;
use praxis_api::usecase::grade::{ExecuteTaskInput, ExecuteTaskUseCase, GetTestResultsUseCase};

use crate::helpers::{
    MockExecution, MockExecutor, MockTaskRepo, MockTestResultRepo, test_task,
};

fn ok(output: &str) -> MockExecution {
    MockExecution::Output {
        code: 0,
        output: output.to_owned(),
    }
}

fn nonzero(output: &str) -> MockExecution {
    MockExecution::Output {
        code: 1,
        output: output.to_owned(),
    }
}

fn submission(task_id: i32) -> ExecuteTaskInput {
    ExecuteTaskInput {
        task_id,
        code: "print(int(input()) * 2)".to_owned(),
    }
}

#[tokio::test]
async fn should_report_two_of_three_tests_passing() {
    let task = test_task(7, vec![("1", "2"), ("2", "4"), ("3", "6")]);
    let usecase = ExecuteTaskUseCase {
        tasks: MockTaskRepo::new(vec![task]),
        results: MockTestResultRepo::empty(),
        // Third test exits non-zero: counted as failed.
        executor: MockExecutor::new(vec![
            ("1", ok("2\n")),
            ("2", ok("4\n")),
            ("3", nonzero("")),
        ]),
    };

    let summary = usecase.execute(Uuid::now_v7(), submission(7)).await.unwrap();

    assert_eq!(summary.task_id, 7);
    assert_eq!(summary.passed_tests, 2);
    assert_eq!(summary.total_tests, 3);
}

#[tokio::test]
async fn should_fail_test_with_wrong_output_despite_zero_exit() {
    let task = test_task(7, vec![("1", "2")]);
    let usecase = ExecuteTaskUseCase {
        tasks: MockTaskRepo::new(vec![task]),
        results: MockTestResultRepo::empty(),
        executor: MockExecutor::new(vec![("1", ok("3\n"))]),
    };

    let summary = usecase.execute(Uuid::now_v7(), submission(7)).await.unwrap();

    assert_eq!(summary.passed_tests, 0);
    assert_eq!(summary.total_tests, 1);
}

#[tokio::test]
async fn should_record_transport_failure_as_failed_test_not_abort() {
    let task = test_task(7, vec![("1", "2"), ("2", "4")]);
    let results = MockTestResultRepo::empty();
    let usecase = ExecuteTaskUseCase {
        tasks: MockTaskRepo::new(vec![task]),
        results: results.clone(),
        executor: MockExecutor::new(vec![("1", ok("2\n")), ("2", MockExecution::Fail)]),
    };

    let summary = usecase.execute(Uuid::now_v7(), submission(7)).await.unwrap();

    assert_eq!(summary.passed_tests, 1);
    assert_eq!(summary.total_tests, 2);

    let recorded = results.results_handle();
    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded.iter().filter(|r| r.passed).count(), 1);
}

#[tokio::test]
async fn should_attribute_each_result_to_its_test_case() {
    let task = test_task(7, vec![("1", "2"), ("2", "4")]);
    let test_ids: Vec<i32> = task.tests.iter().map(|t| t.id).collect();
    let user_id = Uuid::now_v7();
    let results = MockTestResultRepo::empty();
    let usecase = ExecuteTaskUseCase {
        tasks: MockTaskRepo::new(vec![task]),
        results: results.clone(),
        executor: MockExecutor::new(vec![("1", ok("2\n")), ("2", nonzero(""))]),
    };

    usecase.execute(user_id, submission(7)).await.unwrap();

    let recorded = results.results_handle();
    let recorded = recorded.lock().unwrap();
    let passed_for = |id: i32| recorded.iter().find(|r| r.task_test_id == id).unwrap().passed;
    assert!(passed_for(test_ids[0]));
    assert!(!passed_for(test_ids[1]));
    assert!(recorded.iter().all(|r| r.user_id == user_id));
}

#[tokio::test]
async fn should_reject_empty_submission_code() {
    let usecase = ExecuteTaskUseCase {
        tasks: MockTaskRepo::new(vec![test_task(7, vec![("1", "2")])]),
        results: MockTestResultRepo::empty(),
        executor: MockExecutor::new(vec![]),
    };

    let result = usecase
        .execute(
            Uuid::now_v7(),
            ExecuteTaskInput {
                task_id: 7,
                code: "   \n\t".to_owned(),
            },
        )
        .await;

    assert!(matches!(result, Err(ApiError::EmptySubmission)));
}

#[tokio::test]
async fn should_name_missing_task_in_grading_error() {
    let usecase = ExecuteTaskUseCase {
        tasks: MockTaskRepo::empty(),
        results: MockTestResultRepo::empty(),
        executor: MockExecutor::new(vec![]),
    };

    let result = usecase.execute(Uuid::now_v7(), submission(99)).await;
    assert!(matches!(result, Err(ApiError::TaskNotFound(99))));
}

#[tokio::test]
async fn should_list_recorded_results_for_user_and_task() {
    let task = test_task(7, vec![("1", "2")]);
    let user_id = Uuid::now_v7();
    let results = MockTestResultRepo::empty();
    let execute = ExecuteTaskUseCase {
        tasks: MockTaskRepo::new(vec![task]),
        results: results.clone(),
        executor: MockExecutor::new(vec![("1", ok("2\n"))]),
    };
    execute.execute(user_id, submission(7)).await.unwrap();

    let usecase = GetTestResultsUseCase { results };
    let listed = usecase.execute(user_id, 7).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert!(listed[0].passed);

    let other_user = usecase.execute(Uuid::now_v7(), 7).await.unwrap();
    assert!(other_user.is_empty());
}
