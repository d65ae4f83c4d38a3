mod storage;

pub use storage::{
    append_sessions, load_score_sheet, load_sessions, load_template_json, save_scored_session,
};
