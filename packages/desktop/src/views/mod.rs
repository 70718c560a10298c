mod home;
pub use home::Home;

mod signup;
pub use signup::Signup;

mod signin;
pub use signin::Signin;

mod dashboard;
pub use dashboard::Dashboard;
