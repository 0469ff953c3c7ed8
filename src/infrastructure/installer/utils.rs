use indicatif::{ProgressBar, ProgressStyle};

pub fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta}) {percent}%",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// 下载进度回调：首次得到总大小时设置长度
pub fn progress_callback(pb: &ProgressBar) -> impl Fn(u64, u64) + '_ {
    move |downloaded, total| {
        if total > 0 && pb.length() != Some(total) {
            pb.set_length(total);
        }
        pb.set_position(downloaded);
    }
}
