mod error;
mod requests;
mod sorting;
mod types;

pub use error::{TaskError, MAX_TITLE_LEN};
pub use requests::{validate_title, CreateTaskRequest, UpdateTaskRequest};
pub use sorting::{newest_first, sort_tasks_newest_first};
pub use types::{NewTask, Task, TaskId};
