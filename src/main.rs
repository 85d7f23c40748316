//! edaha メインエントリーポイント
//!
//! ターミナルで動くマインドマップエディタ

use anyhow::Context;
use edaha::App;

fn main() -> anyhow::Result<()> {
    println!("edaha - マインドマップエディタ v{}", env!("CARGO_PKG_VERSION"));

    let mut app = App::new().context("アプリケーションの初期化に失敗しました")?;
    app.run().context("実行中にエラーが発生しました")?;

    Ok(())
}
