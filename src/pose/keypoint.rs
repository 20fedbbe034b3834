use serde::{Deserialize, Serialize};

/// MoveNet の 17 キーポイントインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const COUNT: usize = 17;

    pub const ALL: [KeypointIndex; Self::COUNT] = [
        Self::Nose,
        Self::LeftEye,
        Self::RightEye,
        Self::LeftEar,
        Self::RightEar,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
    ];

    /// ポーズ推定モデルが出力するキーポイント名
    pub fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    /// 名前からインデックスを引く（未知の名前は None）
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|idx| idx.name() == name)
    }
}

/// 単一キーポイント（画像ピクセル座標）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// 解剖学的名称 (e.g. "left_shoulder")
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// 信頼度スコア (0.0〜1.0)
    #[serde(default)]
    pub score: f64,
}

impl Keypoint {
    pub fn new(name: impl Into<String>, x: f64, y: f64, score: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            score,
        }
    }

    /// インデックスから名前付きキーポイントを作成
    pub fn at(index: KeypointIndex, x: f64, y: f64, score: f64) -> Self {
        Self::new(index.name(), x, y, score)
    }

    /// 信頼度が閾値以上か
    pub fn is_valid(&self, threshold: f64) -> bool {
        self.score >= threshold
    }

    pub fn index(&self) -> Option<KeypointIndex> {
        KeypointIndex::from_name(&self.name)
    }
}

/// 1人分の検出結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub keypoints: Vec<Keypoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Detection {
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self {
            keypoints,
            score: None,
        }
    }
}
