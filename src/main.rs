use mybatis_log_parser::error::Result;
use mybatis_log_parser::parse_mybatis_log;
use std::io::Read;

fn main() -> Result<()> {
    // 读取参数指定的日志文件，缺省从标准输入读取
    let log_text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let statements = parse_mybatis_log(&log_text);
    println!("{}", serde_json::to_string_pretty(&statements)?);
    eprintln!("解析完成，共提取 {} 条 SQL 语句。", statements.len());
    Ok(())
}
