use uuid::Uuid;

use praxis_api::domain::types::{Theme, UserRole};
use praxis_api::error::ApiError;
use praxis_api::usecase::course::{
    DeleteCourseUseCase, GetCourseUseCase, ListCourseThemesUseCase, ListCoursesUseCase,
};

use crate::helpers::{MockCourseRepo, MockRoleRepo, test_course};

fn viewer(roles: &MockRoleRepo, role: UserRole) -> Uuid {
    let user_id = Uuid::now_v7();
    roles.assign(user_id, role);
    user_id
}

#[tokio::test]
async fn should_hide_disabled_courses_from_plain_users() {
    let roles = MockRoleRepo::seeded();
    let user = viewer(&roles, UserRole::User);
    let usecase = ListCoursesUseCase {
        courses: MockCourseRepo::new(vec![test_course(1, false), test_course(2, true)]),
        roles,
    };

    let courses = usecase.execute(Some(user)).await.unwrap();

    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].id, 1);
}

#[tokio::test]
async fn should_show_disabled_courses_to_admin() {
    let roles = MockRoleRepo::seeded();
    let admin = viewer(&roles, UserRole::Admin);
    let usecase = ListCoursesUseCase {
        courses: MockCourseRepo::new(vec![test_course(1, false), test_course(2, true)]),
        roles,
    };

    let courses = usecase.execute(Some(admin)).await.unwrap();

    assert_eq!(courses.len(), 2);
}

#[tokio::test]
async fn should_treat_anonymous_viewer_as_plain_user() {
    let usecase = ListCoursesUseCase {
        courses: MockCourseRepo::new(vec![test_course(1, false), test_course(2, true)]),
        roles: MockRoleRepo::seeded(),
    };

    let courses = usecase.execute(None).await.unwrap();

    assert_eq!(courses.len(), 1);
}

#[tokio::test]
async fn should_hide_disabled_course_from_get_for_plain_user() {
    let roles = MockRoleRepo::seeded();
    let user = viewer(&roles, UserRole::User);
    let usecase = GetCourseUseCase {
        courses: MockCourseRepo::new(vec![test_course(2, true)]),
        roles,
    };

    let result = usecase.execute(2, Some(user)).await;
    assert!(matches!(result, Err(ApiError::CourseNotFound(2))));
}

#[tokio::test]
async fn should_show_disabled_course_to_teacher() {
    let roles = MockRoleRepo::seeded();
    let teacher = viewer(&roles, UserRole::Teacher);
    let usecase = GetCourseUseCase {
        courses: MockCourseRepo::new(vec![test_course(2, true)]),
        roles,
    };

    let course = usecase.execute(2, Some(teacher)).await.unwrap();
    assert_eq!(course.id, 2);
}

#[tokio::test]
async fn should_name_missing_course_on_delete() {
    let usecase = DeleteCourseUseCase {
        courses: MockCourseRepo::new(vec![]),
    };

    let result = usecase.execute(9).await;
    assert!(matches!(result, Err(ApiError::CourseNotFound(9))));
}

#[tokio::test]
async fn should_filter_disabled_themes_for_plain_users() {
    let roles = MockRoleRepo::seeded();
    let user = viewer(&roles, UserRole::User);
    let themes = vec![
        Theme {
            id: 1,
            course_id: 1,
            name: "intro".to_owned(),
            description: None,
            is_disabled: false,
        },
        Theme {
            id: 2,
            course_id: 1,
            name: "draft".to_owned(),
            description: None,
            is_disabled: true,
        },
    ];
    let usecase = ListCourseThemesUseCase {
        courses: MockCourseRepo::new(vec![test_course(1, false)]).with_themes(themes),
        roles,
    };

    let visible = usecase.execute(1, Some(user)).await.unwrap();

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, 1);
}

#[tokio::test]
async fn should_report_missing_course_when_listing_themes() {
    let usecase = ListCourseThemesUseCase {
        courses: MockCourseRepo::new(vec![]),
        roles: MockRoleRepo::seeded(),
    };

    let result = usecase.execute(5, None).await;
    assert!(matches!(result, Err(ApiError::CourseNotFound(5))));
}
