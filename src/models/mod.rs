pub mod course;

pub use course::{
    Course, CreateCourseRequest, DeleteCourseRequest, Filters, GetAllCoursesRequest,
    GetCourseRequest, UpdateCourseRequest,
};
