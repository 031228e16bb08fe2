//! Writes a small deterministic artifact set so the server can be
//! smoke-tested locally without the real training pipeline. The artifacts
//! cover the three PTIK concentrations with a hand-built forest; they are
//! fixtures, not a trained model.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use skripsi::artifacts::{CLASSIFIER_FILE, LABEL_ENCODER_FILE, VECTORIZER_FILE};
use skripsi::{DecisionTree, LabelEncoder, RandomForest, TfidfVectorizer, TreeNode};

#[derive(Parser)]
#[command(about = "Generate a demo artifact set for the skripsi server")]
struct Args {
    /// Directory to write the artifacts into
    #[arg(short, long, default_value = "models")]
    out_dir: PathBuf,
}

fn demo_vectorizer() -> TfidfVectorizer {
    let terms = [
        ("jaringan", 0),
        ("keamanan", 1),
        ("server", 2),
        ("multimedia", 3),
        ("animasi", 4),
        ("video", 5),
        ("aplikasi", 6),
        ("web", 7),
        ("sistem", 8),
    ];
    let vocabulary: HashMap<String, usize> = terms
        .iter()
        .map(|(term, idx)| (term.to_string(), *idx))
        .collect();
    // Rarer terms carry heavier weights, as the training run produced them.
    let idf = vec![1.9, 2.3, 2.1, 1.8, 2.4, 2.2, 1.7, 2.0, 1.4];
    TfidfVectorizer::new(vocabulary, idf)
}

fn demo_forest() -> RandomForest {
    // Feature groups: 0-2 networking, 3-5 multimedia, 6-8 software.
    // Each tree keys on one representative feature per group.
    let tree = |net: usize, mm: usize| {
        DecisionTree::new(vec![
            TreeNode::Split {
                feature: net,
                threshold: 0.1,
                left: 1,
                right: 2,
            },
            TreeNode::Split {
                feature: mm,
                threshold: 0.1,
                left: 3,
                right: 4,
            },
            TreeNode::Leaf {
                distribution: vec![0.85, 0.05, 0.10],
            },
            TreeNode::Leaf {
                distribution: vec![0.05, 0.10, 0.85],
            },
            TreeNode::Leaf {
                distribution: vec![0.05, 0.90, 0.05],
            },
        ])
    };
    RandomForest::new(9, 3, vec![tree(0, 3), tree(1, 4), tree(2, 5)])
}

fn demo_labels() -> LabelEncoder {
    LabelEncoder::new(vec![
        "Jaringan Komputer".to_string(),
        "Multimedia".to_string(),
        "Rekayasa Perangkat Lunak".to_string(),
    ])
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    fs::create_dir_all(&args.out_dir)?;

    let artifacts: [(&str, serde_json::Value); 3] = [
        (CLASSIFIER_FILE, serde_json::to_value(demo_forest())?),
        (VECTORIZER_FILE, serde_json::to_value(demo_vectorizer())?),
        (LABEL_ENCODER_FILE, serde_json::to_value(demo_labels())?),
    ];

    for (name, value) in artifacts {
        let path = args.out_dir.join(name);
        fs::write(&path, serde_json::to_vec_pretty(&value)?)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
