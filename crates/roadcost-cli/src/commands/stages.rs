use roadcost_core::lifecycle::StageList;

pub fn run() {
    print!("{}", StageList::pipeline());
}
