use crate::pose::KeypointIndex;

/// 骨格の接続定義 (開始キーポイント, 終了キーポイント)
pub const SKELETON_CONNECTIONS: [(KeypointIndex, KeypointIndex); 16] = [
    // 顔
    (KeypointIndex::Nose, KeypointIndex::LeftEye),
    (KeypointIndex::Nose, KeypointIndex::RightEye),
    (KeypointIndex::LeftEye, KeypointIndex::LeftEar),
    (KeypointIndex::RightEye, KeypointIndex::RightEar),
    // 上半身
    (KeypointIndex::LeftShoulder, KeypointIndex::RightShoulder),
    (KeypointIndex::LeftShoulder, KeypointIndex::LeftElbow),
    (KeypointIndex::RightShoulder, KeypointIndex::RightElbow),
    (KeypointIndex::LeftElbow, KeypointIndex::LeftWrist),
    (KeypointIndex::RightElbow, KeypointIndex::RightWrist),
    // 胴体
    (KeypointIndex::LeftShoulder, KeypointIndex::LeftHip),
    (KeypointIndex::RightShoulder, KeypointIndex::RightHip),
    (KeypointIndex::LeftHip, KeypointIndex::RightHip),
    // 下半身
    (KeypointIndex::LeftHip, KeypointIndex::LeftKnee),
    (KeypointIndex::RightHip, KeypointIndex::RightKnee),
    (KeypointIndex::LeftKnee, KeypointIndex::LeftAnkle),
    (KeypointIndex::RightKnee, KeypointIndex::RightAnkle),
];

/// キーポイントの色 (RGB)
pub const KEYPOINT_COLOR: [u8; 3] = [255, 0, 0]; // 赤

/// 骨格線の色 (RGB)
pub const SKELETON_COLOR: [u8; 3] = [0, 0, 255]; // 青

/// 推定頭頂の色 (RGB)
pub const HEAD_TOP_COLOR: [u8; 3] = [0, 128, 0]; // 緑
