use std::path::Path;

use anglecut_models::AngleId;
use anglecut_worker::pipeline::clip_dirs;
use anglecut_worker::WorkerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = WorkerConfig::from_env()?;

    println!(
        "anglecut-selfcheck: {} angles in {}",
        config.director.angles,
        config.input_dir.display()
    );
    ensure_angles(&config)?;
    ensure_output_dir(&config.output_dir).await?;

    println!("anglecut-selfcheck: ok");
    Ok(())
}

fn ensure_angles(config: &WorkerConfig) -> anyhow::Result<()> {
    for index in 0..config.director.angles {
        let dir = config.angle_dir(index);
        let clips = clip_dirs(AngleId(index), &dir)
            .map_err(|e| anyhow::anyhow!("angle {} not usable: {}", index, e))?;
        for clip in &clips {
            if !clip.join("masks").is_dir() {
                return Err(anyhow::anyhow!(
                    "{} has frames/ but no masks/",
                    clip.display()
                ));
            }
        }
        println!("anglecut-selfcheck: angle {} has {} clip(s)", index, clips.len());
    }
    Ok(())
}

async fn ensure_output_dir<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
