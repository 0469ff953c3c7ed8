use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mj CLI 应用程序
#[derive(Parser)]
#[command(name = "mj")]
#[command(about = "JDK 版本管理工具：安装、切换、列出和删除本地 JDK", long_about = None)]
#[command(version)]
pub struct Cli {
    /// config.json 路径
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// jdk_version.json 路径
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// 顶级命令
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// 列出已安装的 JDK
    #[command(alias = "list")]
    Ls {
        /// JSON 格式输出
        #[arg(long)]
        json: bool,
    },
    /// 切换到已安装的 JDK
    Use {
        /// 安装目录下的目录名
        version: String,
    },
    /// 列出可安装的版本
    Available {
        /// `common` 列出本地目录，其他值按厂商查询 GitHub 发行版
        version: String,
        /// JSON 格式输出
        #[arg(long)]
        json: bool,
    },
    /// 下载并解压 JDK
    Install {
        /// 例如 zulu-17、oracle-17、gh-graalvm-jdk-17
        version: String,
    },
    /// 删除已安装的 JDK
    #[command(alias = "rm")]
    Remove {
        /// 安装目录下的目录名
        version: String,
    },
    /// 显示当前激活的 JDK
    Current,
}
