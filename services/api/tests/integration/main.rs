
mod course_test;
mod grade_test;
mod oauth_test;
mod token_test;
mod user_test;
