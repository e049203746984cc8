pub mod current_time;
pub mod finish;
pub mod math_calc;
pub mod sleep;

pub use current_time::CurrentTimeTool;
pub use finish::FinishTool;
pub use math_calc::MathCalcTool;
pub use sleep::SleepTool;
