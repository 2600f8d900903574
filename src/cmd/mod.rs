pub mod grade;
pub mod plagiarism;
